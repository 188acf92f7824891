use tower_cookies::{Cookie, Cookies};

use crate::middleware::mw_ctx::JWT_KEY;

pub fn issue_login_jwt(cookies: &Cookies, token: String) {
    cookies.add(
        Cookie::build((JWT_KEY, token))
            // path defaults to the calling route, which would hide the cookie from other /api paths
            .path("/")
            .http_only(true)
            .into(),
    );
}

pub fn clear_login_jwt(cookies: &Cookies) {
    cookies.remove(Cookie::build((JWT_KEY, "")).path("/").into());
}

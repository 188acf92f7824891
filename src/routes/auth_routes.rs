use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_cookies::Cookies;

use crate::{
    middleware::{
        auth_with_login_access::AuthWithLoginAccess,
        error::AppResult,
        mw_ctx::CtxState,
        utils::{
            cookie_utils::{clear_login_jwt, issue_login_jwt},
            extractor_utils::JsonOrFormValidated,
        },
    },
    models::view::user::{LoginView, SessionView, UserView},
    services::auth_service::{AuthLoginInput, AuthRegisterInput, AuthService},
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/register", post(signup))
        .route("/api/login", post(signin))
        .route("/api/logout", get(logout))
        .route("/api/session", get(session))
}

async fn signup(
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(body): JsonOrFormValidated<AuthRegisterInput>,
) -> AppResult<Response> {
    let user = AuthService::new(&state.store, &state.jwt)
        .register(body)
        .await?;
    Ok((StatusCode::CREATED, Json(UserView::from(user))).into_response())
}

async fn signin(
    State(state): State<Arc<CtxState>>,
    cookies: Cookies,
    JsonOrFormValidated(body): JsonOrFormValidated<AuthLoginInput>,
) -> AppResult<Json<LoginView>> {
    let (token, user) = AuthService::new(&state.store, &state.jwt)
        .login(body)
        .await?;
    issue_login_jwt(&cookies, token.clone());
    Ok(Json(LoginView {
        token,
        user: user.into(),
    }))
}

async fn logout(cookies: Cookies) -> StatusCode {
    clear_login_jwt(&cookies);
    StatusCode::OK
}

async fn session(auth: AuthWithLoginAccess) -> Json<SessionView> {
    Json(auth.claims.into())
}

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::entities::user::UserRole;
use crate::middleware::error::AppError;
use crate::middleware::mw_ctx::{CtxState, JWT_KEY};
use crate::utils::jwt::Claims;

/// Any signed-in user. The session token comes from the `jwt` cookie or,
/// failing that, an `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthWithLoginAccess {
    pub user_id: String,
    pub claims: Claims,
}

impl AuthWithLoginAccess {
    pub fn role(&self) -> UserRole {
        self.claims.role
    }
}

fn read_token(parts: &Parts) -> Option<String> {
    let cookies = CookieJar::from_headers(&parts.headers);
    // a cleared cookie stays behind with an empty value
    if let Some(cookie) = cookies.get(JWT_KEY).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }
    parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AuthWithLoginAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let token = read_token(parts).ok_or(AppError::AuthFailNoJwtCookie)?;
        let claims = state.jwt.decode(&token)?;
        Ok(AuthWithLoginAccess {
            user_id: claims.auth.clone(),
            claims,
        })
    }
}

/// Signed-in viewer if there is one; anonymous requests pass through.
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthWithLoginAccess>);

impl MaybeAuth {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(|auth| auth.user_id.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.0
            .as_ref()
            .map(|auth| auth.role().can_access_admin())
            .unwrap_or(false)
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for MaybeAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(
            AuthWithLoginAccess::from_request_parts(parts, state)
                .await
                .ok(),
        ))
    }
}

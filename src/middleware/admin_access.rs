use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::info;

use crate::middleware::auth_with_login_access::AuthWithLoginAccess;
use crate::middleware::error::AppError;
use crate::middleware::mw_ctx::CtxState;

/// Gate for the admin area: the session role must be ADMIN or MASTER.
#[derive(Debug, Clone)]
pub struct AdminAccess {
    pub auth: AuthWithLoginAccess,
}

impl AdminAccess {
    pub fn user_id(&self) -> &str {
        &self.auth.user_id
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthWithLoginAccess::from_request_parts(parts, state).await?;
        if !auth.role().can_access_admin() {
            info!(
                "user {} with role {} denied admin path {}",
                auth.user_id,
                auth.role(),
                parts.uri.path()
            );
            return Err(AppError::Forbidden);
        }
        Ok(AdminAccess { auth })
    }
}

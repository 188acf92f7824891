use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;

use crate::backend::client::{Backend, BackendConfig};
use crate::config::AppConfig;
use crate::middleware::error::AppResult;
use crate::store::AppStore;
use crate::utils::jwt::JWT;

pub const JWT_KEY: &str = "jwt";

pub struct CtxState {
    pub backend: Backend,
    pub store: AppStore,
    pub jwt: JWT,
    pub is_development: bool,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("backend", &self.backend.base_url())
            .field("is_development", &self.is_development)
            .finish()
    }
}

pub fn create_ctx_state(config: &AppConfig) -> AppResult<Arc<CtxState>> {
    let backend = Backend::connect(BackendConfig {
        url: &config.backend_url,
        timeout_secs: config.backend_timeout_secs,
    })?;

    let ctx_state = CtxState {
        store: AppStore::new(&backend),
        backend,
        jwt: JWT::new(
            config.jwt_secret.clone(),
            Duration::days(config.jwt_duration_days),
        ),
        is_development: config.is_development,
    };
    Ok(Arc::new(ctx_state))
}

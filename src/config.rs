use dotenvy;

use crate::middleware::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub jwt_secret: String,
    pub jwt_duration_days: i64,
    pub port: u16,
    pub is_development: bool,
}

fn required(name: &str) -> AppResult<String> {
    std::env::var(name).map_err(|_| AppError::Generic {
        description: format!("Missing {name} in env"),
    })
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse::<T>().map_err(|_| AppError::Generic {
            description: format!("{name} must be a number"),
        }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let backend_url = required("BACKEND_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let jwt_duration_days = parsed("JWT_DURATION_DAYS", 7)?;
        let port = parsed("PORT", 8080)?;
        let backend_timeout_secs = parsed("BACKEND_TIMEOUT_SECS", 10)?;
        let is_development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq("true"))
            .unwrap_or(false);

        Ok(Self {
            backend_url,
            backend_timeout_secs,
            jwt_secret,
            jwt_duration_days,
            port,
            is_development,
        })
    }
}

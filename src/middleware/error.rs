use std::fmt;

use axum::{http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    AuthenticationFail,
    UserNotFound,
    AccountBanned { reason: Option<String> },
    AuthFailNoJwtCookie,
    AuthFailJwtInvalid { source: String },
    Forbidden,
    EntityFailIdNotFound { ident: String },
    Backend { status: u16, source: String },
    BackendFailed { status: u16, source: String },
    BackendUnavailable { source: String },
    Serde { source: String },
}

/// Any error produced while serving a request or talking to the backend.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::AuthenticationFail => write!(f, "Wrong password"),
            Self::UserNotFound => write!(f, "Cannot find that user, please try again!"),
            Self::AccountBanned { reason } => match reason {
                Some(reason) => write!(f, "This account is banned: {reason}"),
                None => write!(f, "This account is banned"),
            },
            Self::AuthFailNoJwtCookie => write!(f, "You are not logged in"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "The provided JWT token is not valid"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::Backend { status, source } => write!(f, "Backend error {status} - {source}"),
            Self::BackendFailed { status, source } => {
                write!(f, "Backend failed {status} - {source}")
            }
            Self::BackendUnavailable { .. } => write!(f, "Backend is not reachable"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EntityFailIdNotFound { .. } | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Generic { .. } | AppError::Backend { .. } => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFail
            | AppError::AuthFailNoJwtCookie
            | AppError::AuthFailJwtInvalid { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::AccountBanned { .. } => StatusCode::FORBIDDEN,
            AppError::BackendFailed { .. }
            | AppError::BackendUnavailable { .. }
            | AppError::Serde { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    pub error: String,
    pub req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let req_id = Uuid::new_v4().to_string();
        warn!("->> {:<12} - into_response - {req_id} - {self:?}", "ERROR");
        let status_code = self.status_code();
        let body = ErrorResponseBody::new(self.to_string(), Some(req_id));
        let mut response = (status_code, axum::Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Serde {
                source: value.to_string(),
            };
        }
        match value.status() {
            Some(status) if status.is_server_error() => Self::BackendFailed {
                status: status.as_u16(),
                source: value.to_string(),
            },
            Some(status) => Self::Backend {
                status: status.as_u16(),
                source: value.to_string(),
            },
            None => Self::BackendUnavailable {
                source: value.to_string(),
            },
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Generic {
            description: value.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Generic {
            description: value.to_string(),
        }
    }
}

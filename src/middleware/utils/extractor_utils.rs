use axum::body::Body;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{
    async_trait,
    response::{IntoResponse, Response},
    Form, Json, RequestExt,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::middleware::error::ErrorResponseBody;

/// Accepts either a JSON or an urlencoded form body and runs the `validator`
/// rules before the handler sees it.
#[derive(Debug)]
pub struct JsonOrFormValidated<T>(pub T);

fn validation_rejection(description: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseBody::new(description, None)),
    )
        .into_response()
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrFormValidated<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<(), Rejection = JsonRejection>,
    Form<T>: FromRequest<(), Rejection = FormRejection>,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(content_type) = content_type {
            if content_type.starts_with("application/json") {
                let Json(payload) = req
                    .extract::<Json<T>, _>()
                    .await
                    .map_err(|err| validation_rejection(err.body_text()))?;
                payload
                    .validate()
                    .map_err(|err| validation_rejection(err.to_string()))?;
                return Ok(Self(payload));
            }

            if content_type.starts_with("application/x-www-form-urlencoded") {
                let Form(payload) = req
                    .extract::<Form<T>, _>()
                    .await
                    .map_err(|err| validation_rejection(err.body_text()))?;
                payload
                    .validate()
                    .map_err(|err| validation_rejection(err.to_string()))?;
                return Ok(Self(payload));
            }
        }

        Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PageParams {
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchParams {
    pub search: Option<String>,
    pub page: Option<usize>,
}

impl SearchParams {
    /// Lowercased, trimmed search term; blank terms count as no search.
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

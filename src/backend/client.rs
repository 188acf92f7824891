use std::time::Duration;

use reqwest::{Client, Url};
use tracing::info;

use crate::middleware::error::{AppError, AppResult};

#[derive(Debug)]
pub struct BackendConfig<'a> {
    pub url: &'a str,
    pub timeout_secs: u64,
}

/// Shared HTTP connection to the REST backend that owns all blog data.
#[derive(Debug, Clone)]
pub struct Backend {
    pub client: Client,
    base_url: String,
    base: Url,
}

impl Backend {
    pub fn connect(config: BackendConfig<'_>) -> AppResult<Self> {
        info!("->> connecting backend config = {:?}", config);
        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Generic {
                description: format!("Backend url must be http(s), got '{base_url}'"),
            });
        }

        let base = Url::parse(&base_url).map_err(|e| AppError::Generic {
            description: format!("Backend url '{base_url}' is invalid: {e}"),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::BackendUnavailable {
                source: e.to_string(),
            })?;

        info!("->> backend client ready for {base_url}");
        Ok(Self {
            client,
            base_url,
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_matches('/'))
    }

    /// The id goes in as one escaped path segment, so `/`, `?` or `#` in it
    /// cannot reach another resource.
    pub fn record_url(&self, path: &str, id: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.trim_matches('/').split('/'))
                .push(id);
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_resource_urls() {
        let backend = Backend::connect(BackendConfig {
            url: "http://localhost:3000/",
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(backend.collection_url("articles"), "http://localhost:3000/articles");
        assert_eq!(
            backend.record_url("/likes/", "12"),
            "http://localhost:3000/likes/12"
        );
    }

    #[test]
    fn escapes_record_ids() {
        let backend = Backend::connect(BackendConfig {
            url: "http://localhost:3000/api/",
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            backend.record_url("articles", "../users/1"),
            "http://localhost:3000/api/articles/..%2Fusers%2F1"
        );
        assert_eq!(
            backend.record_url("articles", "3?status=private"),
            "http://localhost:3000/api/articles/3%3Fstatus=private"
        );
    }

    #[test]
    fn rejects_non_http_url() {
        let res = Backend::connect(BackendConfig {
            url: "localhost:3000",
            timeout_secs: 5,
        });
        assert!(res.is_err());
    }
}

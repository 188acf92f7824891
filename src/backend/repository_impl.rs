use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::backend::client::Backend;
use crate::backend::query_builder::QueryFilter;
use crate::backend::repository_traits::{RepositoryCore, Resource};
use crate::middleware::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Repository<E> {
    backend: Backend,
    _phantom: PhantomData<E>,
}

impl<E: Resource> Repository<E> {
    pub fn new(backend: Backend) -> Self {
        Repository {
            backend,
            _phantom: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        self.backend.collection_url(E::PATH)
    }

    fn record_url(&self, id: &str) -> String {
        self.backend.record_url(E::PATH, id)
    }
}

async fn check_status(response: Response, ident: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::EntityFailIdNotFound {
            ident: ident.to_string(),
        });
    }
    let source = response.text().await.unwrap_or_default();
    if status.is_server_error() {
        return Err(AppError::BackendFailed {
            status: status.as_u16(),
            source,
        });
    }
    Err(AppError::Backend {
        status: status.as_u16(),
        source,
    })
}

async fn decode<T: DeserializeOwned>(response: Response, ident: &str) -> AppResult<T> {
    let response = check_status(response, ident).await?;
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl<E: Resource> RepositoryCore for Repository<E> {
    type Item = E;

    async fn list(&self) -> AppResult<Vec<E>> {
        debug!("GET {}", self.collection_url());
        let res = self.backend.client.get(self.collection_url()).send().await?;
        decode(res, E::PATH).await
    }

    async fn list_where(&self, filter: &QueryFilter) -> AppResult<Vec<E>> {
        if filter.is_empty() {
            return self.list().await;
        }
        debug!("GET {} {:?}", self.collection_url(), filter);
        let res = self
            .backend
            .client
            .get(self.collection_url())
            .query(filter.pairs())
            .send()
            .await?;
        decode(res, E::PATH).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<E> {
        let ident = format!("{}:{id}", E::PATH);
        let res = self.backend.client.get(self.record_url(id)).send().await?;
        decode(res, &ident).await
    }

    async fn create(&self, body: Value) -> AppResult<E> {
        debug!("POST {}", self.collection_url());
        let res = self
            .backend
            .client
            .post(self.collection_url())
            .json(&body)
            .send()
            .await?;
        decode(res, E::PATH).await
    }

    async fn update(&self, item: &E) -> AppResult<E> {
        let ident = format!("{}:{}", E::PATH, item.id());
        let res = self
            .backend
            .client
            .put(self.record_url(item.id()))
            .json(item)
            .send()
            .await?;
        decode(res, &ident).await
    }

    async fn patch(&self, id: &str, changes: Value) -> AppResult<E> {
        let ident = format!("{}:{id}", E::PATH);
        let res = self
            .backend
            .client
            .patch(self.record_url(id))
            .json(&changes)
            .send()
            .await?;
        decode(res, &ident).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let ident = format!("{}:{id}", E::PATH);
        let res = self.backend.client.delete(self.record_url(id)).send().await?;
        check_status(res, &ident).await?;
        Ok(())
    }
}

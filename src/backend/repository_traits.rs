use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::backend::query_builder::QueryFilter;
use crate::middleware::error::AppResult;

/// Backend ids arrive as numbers or strings; both are kept as strings.
pub type ResourceId = String;

/// A record type served by one backend collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const PATH: &'static str;

    fn id(&self) -> &str;
}

#[async_trait]
pub trait RepositoryCore: Send + Sync {
    type Item: Resource;

    async fn list(&self) -> AppResult<Vec<Self::Item>>;
    async fn list_where(&self, filter: &QueryFilter) -> AppResult<Vec<Self::Item>>;
    async fn get_by_id(&self, id: &str) -> AppResult<Self::Item>;
    async fn create(&self, body: Value) -> AppResult<Self::Item>;
    async fn update(&self, item: &Self::Item) -> AppResult<Self::Item>;
    async fn patch(&self, id: &str, changes: Value) -> AppResult<Self::Item>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use crate::backend::query_builder::QueryFilter;
use crate::backend::repository_traits::{RepositoryCore, Resource};
use crate::middleware::error::AppResult;

/// Cached view of one backend collection.
#[derive(Debug, Clone, Serialize)]
pub struct SliceState<E> {
    pub items: Vec<E>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<E> Default for SliceState<E> {
    fn default() -> Self {
        Self {
            items: vec![],
            loading: false,
            error: None,
        }
    }
}

impl<E: Resource> SliceState<E> {
    fn upsert(&mut self, item: E) {
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id() != id);
    }
}

/// Mediates reads and writes against one backend collection and keeps a local
/// copy in sync. The cache only changes after the backend call succeeds; on
/// failure the items stay as they were and `error` holds the message.
pub struct ResourceStore<R: RepositoryCore> {
    repository: R,
    state: RwLock<SliceState<R::Item>>,
}

impl<R: RepositoryCore> ResourceStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            state: RwLock::new(SliceState::default()),
        }
    }

    pub async fn snapshot(&self) -> SliceState<R::Item> {
        self.state.read().await.clone()
    }

    pub async fn cached(&self, id: &str) -> Option<R::Item> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|i| i.id() == id)
            .cloned()
    }

    async fn pending(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    /// Records the outcome: a failure keeps its message, a success clears it.
    async fn settle<T>(&self, result: AppResult<T>) -> AppResult<T> {
        let mut state = self.state.write().await;
        state.loading = false;
        match &result {
            Ok(_) => state.error = None,
            Err(err) => {
                warn!("{} request failed: {err}", <R::Item as Resource>::PATH);
                state.error = Some(err.to_string());
            }
        }
        result
    }

    /// Replaces the whole cache with the backend collection.
    pub async fn fetch_all(&self) -> AppResult<Vec<R::Item>> {
        self.pending().await;
        let items = self.settle(self.repository.list().await).await?;
        let mut state = self.state.write().await;
        state.loading = false;
        state.items = items.clone();
        Ok(items)
    }

    /// Fetches a filtered subset and merges it into the cache by id.
    pub async fn fetch_where(&self, filter: &QueryFilter) -> AppResult<Vec<R::Item>> {
        self.pending().await;
        let items = self
            .settle(self.repository.list_where(filter).await)
            .await?;
        let mut state = self.state.write().await;
        state.loading = false;
        for item in items.iter() {
            state.upsert(item.clone());
        }
        Ok(items)
    }

    pub async fn find(&self, id: &str) -> AppResult<R::Item> {
        let item = self.settle(self.repository.get_by_id(id).await).await?;
        self.state.write().await.upsert(item.clone());
        Ok(item)
    }

    pub async fn create<B: Serialize>(&self, body: &B) -> AppResult<R::Item> {
        let body = serde_json::to_value(body)?;
        let item = self.settle(self.repository.create(body).await).await?;
        self.state.write().await.items.push(item.clone());
        Ok(item)
    }

    pub async fn update(&self, item: &R::Item) -> AppResult<R::Item> {
        let item = self.settle(self.repository.update(item).await).await?;
        self.state.write().await.upsert(item.clone());
        Ok(item)
    }

    pub async fn patch(&self, id: &str, changes: Value) -> AppResult<R::Item> {
        let item = self
            .settle(self.repository.patch(id, changes).await)
            .await?;
        self.state.write().await.upsert(item.clone());
        Ok(item)
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        self.settle(self.repository.delete(id).await).await?;
        self.state.write().await.remove(id);
        Ok(())
    }
}

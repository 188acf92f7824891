pub mod resource_store;

use serde::Serialize;

use crate::backend::client::Backend;
use crate::backend::repository_impl::Repository;
use crate::backend::repository_traits::{RepositoryCore, Resource};
use crate::entities::{
    article::Article, category::Category, comment::Comment, like::Like, reply::Reply, user::User,
};
use resource_store::ResourceStore;

pub type UserStore = ResourceStore<Repository<User>>;
pub type ArticleStore = ResourceStore<Repository<Article>>;
pub type CategoryStore = ResourceStore<Repository<Category>>;
pub type CommentStore = ResourceStore<Repository<Comment>>;
pub type ReplyStore = ResourceStore<Repository<Reply>>;
pub type LikeStore = ResourceStore<Repository<Like>>;

/// One cache per backend collection.
pub struct AppStore {
    pub users: UserStore,
    pub articles: ArticleStore,
    pub categories: CategoryStore,
    pub comments: CommentStore,
    pub replies: ReplyStore,
    pub likes: LikeStore,
}

impl AppStore {
    pub fn new(backend: &Backend) -> Self {
        Self {
            users: ResourceStore::new(Repository::new(backend.clone())),
            articles: ResourceStore::new(Repository::new(backend.clone())),
            categories: ResourceStore::new(Repository::new(backend.clone())),
            comments: ResourceStore::new(Repository::new(backend.clone())),
            replies: ResourceStore::new(Repository::new(backend.clone())),
            likes: ResourceStore::new(Repository::new(backend.clone())),
        }
    }

    pub async fn status(&self) -> Vec<SliceStatus> {
        vec![
            SliceStatus::of(&self.users).await,
            SliceStatus::of(&self.articles).await,
            SliceStatus::of(&self.categories).await,
            SliceStatus::of(&self.comments).await,
            SliceStatus::of(&self.replies).await,
            SliceStatus::of(&self.likes).await,
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct SliceStatus {
    pub resource: &'static str,
    pub cached_items: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl SliceStatus {
    async fn of<R: RepositoryCore>(store: &ResourceStore<R>) -> Self {
        let state = store.snapshot().await;
        SliceStatus {
            resource: <R::Item as Resource>::PATH,
            cached_items: state.items.len(),
            loading: state.loading,
            error: state.error,
        }
    }
}

use std::collections::HashMap;

use chrono::Utc;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use validator::Validate;

use crate::{
    backend::query_builder::QueryFilter,
    entities::{
        article::{sort_newest_first, Article, ArticleStatus, CreateArticle, Mood, DEFAULT_ARTICLE_IMAGE},
        user::User,
    },
    middleware::{
        error::{AppError, AppResult},
        utils::extractor_utils::PageParams,
    },
    models::view::{
        article::{
            ArticleDetailView, ArticleView, CommentThreadView, MyArticlesView, ReplyView,
        },
        user::AuthorView,
    },
    services::user_service::UserService,
    store::AppStore,
    utils::{
        pagination::{
            page_numbers, paginate, Page, ADMIN_ARTICLES_PAGE_SIZE, HOME_PAGE_SIZE,
            MY_ARTICLES_PAGE_SIZE,
        },
        validate_utils::{deserialize_id, deserialize_option_id, validate_not_blank},
    },
};

const RECENT_ARTICLES: usize = 3;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    #[validate(
        custom(function = validate_not_blank),
        length(max = 200, message = "Max 200 characters")
    )]
    pub title: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub entry_id: String,
    #[validate(custom(function = validate_not_blank))]
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleInput {
    #[validate(
        custom(function = validate_not_blank),
        length(max = 200, message = "Max 200 characters")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_id")]
    pub entry_id: Option<String>,
    #[validate(custom(function = validate_not_blank))]
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub status: Option<ArticleStatus>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AdminEditArticleInput {
    #[validate(
        custom(function = validate_not_blank),
        length(max = 200, message = "Max 200 characters")
    )]
    pub title: String,
    #[validate(custom(function = validate_not_blank))]
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleStatusInput {
    pub status: ArticleStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct ArticleListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Private articles are visible to their author and to the admin area only.
pub fn can_view(article: &Article, viewer_id: Option<&str>, is_admin: bool) -> bool {
    article.is_public() || is_admin || viewer_id.is_some_and(|id| article.is_owned_by(id))
}

fn author_of(users: &HashMap<&str, &User>, user_id: &str) -> AuthorView {
    users
        .get(user_id)
        .map(|u| AuthorView::of(u))
        .unwrap_or_else(|| AuthorView::unknown(user_id))
}

pub struct ArticleService<'a> {
    store: &'a AppStore,
}

impl<'a> ArticleService<'a> {
    pub fn new(store: &'a AppStore) -> Self {
        Self { store }
    }

    async fn public_articles(&self) -> AppResult<Vec<Article>> {
        let mut articles: Vec<Article> = self
            .store
            .articles
            .fetch_all()
            .await?
            .into_iter()
            .filter(Article::is_public)
            .collect();
        sort_newest_first(&mut articles);
        Ok(articles)
    }

    pub async fn list_public(&self, params: ArticleListParams) -> AppResult<Page<ArticleView>> {
        let category = params
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
        let term = params
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let articles = self
            .public_articles()
            .await?
            .into_iter()
            .filter(|a| category.map_or(true, |c| a.in_category(c)))
            .filter(|a| {
                term.as_deref().map_or(true, |t| {
                    a.title.to_lowercase().contains(t) || a.content.to_lowercase().contains(t)
                })
            })
            .collect();

        Ok(paginate(articles, params.page, HOME_PAGE_SIZE).map(ArticleView::from))
    }

    pub async fn recent(&self) -> AppResult<Vec<ArticleView>> {
        Ok(self
            .public_articles()
            .await?
            .into_iter()
            .take(RECENT_ARTICLES)
            .map(ArticleView::from)
            .collect())
    }

    /// Loads an article the viewer is allowed to see. Hidden articles look
    /// the same as missing ones.
    pub async fn find_visible(
        &self,
        article_id: &str,
        viewer_id: Option<&str>,
        is_admin: bool,
    ) -> AppResult<Article> {
        let article = self.store.articles.find(article_id).await?;
        if !can_view(&article, viewer_id, is_admin) {
            return Err(AppError::EntityFailIdNotFound {
                ident: article_id.to_string(),
            });
        }
        Ok(article)
    }

    pub async fn detail(
        &self,
        article_id: &str,
        viewer_id: Option<&str>,
        is_admin: bool,
    ) -> AppResult<ArticleDetailView> {
        let article = self.find_visible(article_id, viewer_id, is_admin).await?;

        let by_article = QueryFilter::new().eq("articleId", &article.id);
        let (users, likes, mut comments) = tokio::try_join!(
            self.store.users.fetch_all(),
            self.store.likes.fetch_where(&by_article),
            self.store.comments.fetch_where(&by_article),
        )?;
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let replies = try_join_all(comments.iter().map(|comment| async move {
            let by_comment = QueryFilter::new().eq("commentId", &comment.id);
            self.store.replies.fetch_where(&by_comment).await
        }))
        .await?;

        let users: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();
        let comments = comments
            .into_iter()
            .zip(replies)
            .map(|(comment, mut replies)| {
                replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                let replies = replies
                    .into_iter()
                    .map(|reply| {
                        let author = author_of(&users, &reply.user_id);
                        ReplyView::new(reply, author)
                    })
                    .collect();
                let author = author_of(&users, &comment.user_id);
                CommentThreadView::new(comment, author, replies)
            })
            .collect();

        Ok(ArticleDetailView {
            author: author_of(&users, &article.user_id),
            likes_count: likes.len(),
            liked_by_me: viewer_id.is_some_and(|id| likes.iter().any(|l| l.user_id == id)),
            comments,
            article: article.into(),
        })
    }

    pub async fn create(&self, user_id: &str, input: ArticleInput) -> AppResult<Article> {
        input.validate()?;
        UserService::new(self.store).ensure_active(user_id).await?;
        let category = self.store.categories.find(&input.entry_id).await?;

        let article = self
            .store
            .articles
            .create(&CreateArticle {
                title: input.title.trim().to_string(),
                entry_id: Some(category.id),
                category: category.name,
                user_id: user_id.to_string(),
                content: input.content,
                mood: input.mood,
                status: input.status,
                image: input
                    .image
                    .map(|i| i.trim().to_string())
                    .filter(|i| !i.is_empty())
                    .unwrap_or_else(|| DEFAULT_ARTICLE_IMAGE.to_string()),
                date: Utc::now().date_naive(),
            })
            .await?;
        info!("article {} created by {user_id}", article.id);
        Ok(article)
    }

    async fn find_owned(&self, user_id: &str, article_id: &str) -> AppResult<Article> {
        let article = self.store.articles.find(article_id).await?;
        if !article.is_owned_by(user_id) {
            return Err(AppError::Forbidden);
        }
        Ok(article)
    }

    pub async fn update_own(
        &self,
        user_id: &str,
        article_id: &str,
        input: UpdateArticleInput,
    ) -> AppResult<Article> {
        input.validate()?;
        UserService::new(self.store).ensure_active(user_id).await?;
        self.find_owned(user_id, article_id).await?;

        let mut changes = Map::new();
        if let Some(title) = input.title {
            changes.insert("title".into(), Value::String(title.trim().to_string()));
        }
        if let Some(content) = input.content {
            changes.insert("content".into(), Value::String(content));
        }
        if let Some(mood) = input.mood {
            changes.insert("mood".into(), serde_json::to_value(mood)?);
        }
        if let Some(status) = input.status {
            changes.insert("status".into(), serde_json::to_value(status)?);
        }
        if let Some(image) = input.image {
            let image = Some(image.trim().to_string())
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_ARTICLE_IMAGE.to_string());
            changes.insert("image".into(), Value::String(image));
        }
        if let Some(entry_id) = input.entry_id {
            let category = self.store.categories.find(&entry_id).await?;
            changes.insert("entryId".into(), Value::String(category.id));
            changes.insert("category".into(), Value::String(category.name));
        }

        if changes.is_empty() {
            return self.store.articles.find(article_id).await;
        }
        self.store
            .articles
            .patch(article_id, Value::Object(changes))
            .await
    }

    pub async fn delete_own(&self, user_id: &str, article_id: &str) -> AppResult<()> {
        self.find_owned(user_id, article_id).await?;
        self.store.articles.remove(article_id).await?;
        info!("article {article_id} deleted by {user_id}");
        Ok(())
    }

    pub async fn my_articles(&self, user_id: &str, params: PageParams) -> AppResult<MyArticlesView> {
        let mut articles = self
            .store
            .articles
            .fetch_where(&QueryFilter::new().eq("userId", user_id))
            .await?;
        sort_newest_first(&mut articles);

        let page = paginate(articles, params.page, MY_ARTICLES_PAGE_SIZE).map(ArticleView::from);
        Ok(MyArticlesView {
            page_links: page_numbers(page.page, page.total_pages),
            page,
        })
    }

    pub async fn admin_list(&self, params: PageParams) -> AppResult<Page<ArticleView>> {
        let mut articles = self.store.articles.fetch_all().await?;
        sort_newest_first(&mut articles);
        Ok(paginate(articles, params.page, ADMIN_ARTICLES_PAGE_SIZE).map(ArticleView::from))
    }

    pub async fn admin_edit(
        &self,
        article_id: &str,
        input: AdminEditArticleInput,
    ) -> AppResult<Article> {
        input.validate()?;
        self.store
            .articles
            .patch(
                article_id,
                serde_json::json!({"title": input.title.trim(), "content": input.content}),
            )
            .await
    }

    pub async fn admin_set_status(
        &self,
        article_id: &str,
        status: ArticleStatus,
    ) -> AppResult<Article> {
        self.store
            .articles
            .patch(article_id, serde_json::json!({ "status": status }))
            .await
    }

    pub async fn admin_delete(&self, article_id: &str) -> AppResult<()> {
        self.store.articles.remove(article_id).await
    }
}

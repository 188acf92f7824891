use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    backend::query_builder::QueryFilter,
    entities::{
        comment::{Comment, CreateComment},
        like::CreateLike,
        reply::{CreateReply, Reply},
    },
    middleware::error::AppResult,
    models::view::article::LikeToggleView,
    services::{article_service::ArticleService, user_service::UserService},
    store::AppStore,
    utils::validate_utils::{trim_string, validate_not_blank},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ContentInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(
        custom(function = validate_not_blank),
        length(max = 2000, message = "Max 2000 characters")
    )]
    pub content: String,
}

/// Likes, comments and replies on articles the caller can see.
pub struct InteractionService<'a> {
    store: &'a AppStore,
    articles: ArticleService<'a>,
    users: UserService<'a>,
}

impl<'a> InteractionService<'a> {
    pub fn new(store: &'a AppStore) -> Self {
        Self {
            store,
            articles: ArticleService::new(store),
            users: UserService::new(store),
        }
    }

    /// Likes the article, or removes the caller's like if there is one.
    pub async fn toggle_like(
        &self,
        user_id: &str,
        article_id: &str,
        is_admin: bool,
    ) -> AppResult<LikeToggleView> {
        self.users.ensure_active(user_id).await?;
        let article = self
            .articles
            .find_visible(article_id, Some(user_id), is_admin)
            .await?;

        let likes = self
            .store
            .likes
            .fetch_where(&QueryFilter::new().eq("articleId", &article.id))
            .await?;
        let (mine, others): (Vec<_>, Vec<_>) = likes.into_iter().partition(|l| l.user_id == user_id);

        if mine.is_empty() {
            self.store
                .likes
                .create(&CreateLike {
                    article_id: article.id,
                    user_id: user_id.to_string(),
                    created_at: Utc::now(),
                })
                .await?;
            return Ok(LikeToggleView {
                liked: true,
                likes_count: others.len() + 1,
            });
        }

        // duplicates left by other clients go too
        for like in mine.iter() {
            self.store.likes.remove(&like.id).await?;
        }
        Ok(LikeToggleView {
            liked: false,
            likes_count: others.len(),
        })
    }

    pub async fn add_comment(
        &self,
        user_id: &str,
        article_id: &str,
        is_admin: bool,
        input: ContentInput,
    ) -> AppResult<Comment> {
        input.validate()?;
        self.users.ensure_active(user_id).await?;
        let article = self
            .articles
            .find_visible(article_id, Some(user_id), is_admin)
            .await?;
        self.store
            .comments
            .create(&CreateComment {
                article_id: article.id,
                user_id: user_id.to_string(),
                content: input.content,
                created_at: Utc::now(),
            })
            .await
    }

    pub async fn add_reply(
        &self,
        user_id: &str,
        comment_id: &str,
        is_admin: bool,
        input: ContentInput,
    ) -> AppResult<Reply> {
        input.validate()?;
        self.users.ensure_active(user_id).await?;
        let comment = self.store.comments.find(comment_id).await?;
        self.articles
            .find_visible(&comment.article_id, Some(user_id), is_admin)
            .await?;
        self.store
            .replies
            .create(&CreateReply {
                comment_id: comment.id,
                user_id: user_id.to_string(),
                content: input.content,
                created_at: Utc::now(),
            })
            .await
    }
}

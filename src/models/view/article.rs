use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::article::{Article, ArticleStatus, Mood};
use crate::entities::comment::Comment;
use crate::entities::reply::Reply;
use crate::models::view::user::AuthorView;
use crate::utils::pagination::{Page, PageLink};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: String,
    pub title: String,
    pub entry_id: Option<String>,
    pub category: String,
    pub user_id: String,
    pub content: String,
    pub mood: Mood,
    pub status: ArticleStatus,
    pub image: String,
    pub date: NaiveDate,
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        ArticleView {
            id: article.id,
            title: article.title,
            entry_id: article.entry_id,
            category: article.category,
            user_id: article.user_id,
            content: article.content,
            mood: article.mood,
            status: article.status,
            image: article.image,
            date: article.date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyView {
    pub id: String,
    pub comment_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorView,
}

impl ReplyView {
    pub fn new(reply: Reply, author: AuthorView) -> Self {
        ReplyView {
            id: reply.id,
            comment_id: reply.comment_id,
            content: reply.content,
            created_at: reply.created_at,
            author,
        }
    }
}

/// A comment with its replies, oldest reply first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadView {
    pub id: String,
    pub article_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorView,
    pub replies: Vec<ReplyView>,
}

impl CommentThreadView {
    pub fn new(comment: Comment, author: AuthorView, replies: Vec<ReplyView>) -> Self {
        CommentThreadView {
            id: comment.id,
            article_id: comment.article_id,
            content: comment.content,
            created_at: comment.created_at,
            author,
            replies,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetailView {
    pub article: ArticleView,
    pub author: AuthorView,
    pub likes_count: usize,
    pub liked_by_me: bool,
    pub comments: Vec<CommentThreadView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggleView {
    pub liked: bool,
    pub likes_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MyArticlesView {
    #[serde(flatten)]
    pub page: Page<ArticleView>,
    pub page_links: Vec<PageLink>,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::backend::repository_traits::{Resource, ResourceId};
use crate::backend::resource_paths::ARTICLES_PATH;
use crate::utils::validate_utils::{deserialize_id, deserialize_option_id};

pub const DEFAULT_ARTICLE_IMAGE: &str =
    "https://images.unsplash.com/photo-1497366216548-37526070297c?w=600";

#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Public,
    Private,
}

#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Excited,
    Peaceful,
    Anxious,
    Stressed,
    Grateful,
    Motivated,
    Overwhelmed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ResourceId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_option_id")]
    pub entry_id: Option<ResourceId>,
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: ResourceId,
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub image: String,
    pub date: NaiveDate,
}

impl Article {
    pub fn is_public(&self) -> bool {
        self.status == ArticleStatus::Public
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.entry_id.as_deref() == Some(category) || self.category.eq_ignore_ascii_case(category)
    }
}

impl Resource for Article {
    const PATH: &'static str = ARTICLES_PATH;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<ResourceId>,
    pub category: String,
    pub user_id: ResourceId,
    pub content: String,
    pub mood: Mood,
    pub status: ArticleStatus,
    pub image: String,
    pub date: NaiveDate,
}

/// Newest first; ties broken by id so pages stay stable.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}

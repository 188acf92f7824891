use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::repository_traits::{Resource, ResourceId};
use crate::backend::resource_paths::LIKES_PATH;
use crate::utils::validate_utils::deserialize_id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ResourceId,
    #[serde(deserialize_with = "deserialize_id")]
    pub article_id: ResourceId,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: ResourceId,
    pub created_at: DateTime<Utc>,
}

impl Resource for Like {
    const PATH: &'static str = LIKES_PATH;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLike {
    pub article_id: ResourceId,
    pub user_id: ResourceId,
    pub created_at: DateTime<Utc>,
}

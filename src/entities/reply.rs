use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::repository_traits::{Resource, ResourceId};
use crate::backend::resource_paths::REPLIES_PATH;
use crate::utils::validate_utils::deserialize_id;

/// Second level of a comment thread. Replies attach to comments only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ResourceId,
    #[serde(deserialize_with = "deserialize_id")]
    pub comment_id: ResourceId,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: ResourceId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Resource for Reply {
    const PATH: &'static str = REPLIES_PATH;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReply {
    pub comment_id: ResourceId,
    pub user_id: ResourceId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

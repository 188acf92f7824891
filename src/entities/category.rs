use serde::{Deserialize, Serialize};

use crate::backend::repository_traits::{Resource, ResourceId};
use crate::backend::resource_paths::CATEGORIES_PATH;
use crate::utils::validate_utils::deserialize_id;

/// An article category, called an "entry" by the backend's article records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ResourceId,
    pub name: String,
}

impl Resource for Category {
    const PATH: &'static str = CATEGORIES_PATH;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCategory {
    pub name: String,
}

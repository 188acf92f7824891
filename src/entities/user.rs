use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::backend::repository_traits::{Resource, ResourceId};
use crate::backend::resource_paths::USERS_PATH;
use crate::utils::validate_utils::deserialize_id;

#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Master,
    Admin,
}

impl UserRole {
    /// Only these roles may enter the admin area.
    pub fn can_access_admin(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Master)
    }
}

#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Ban,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ResourceId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
}

impl User {
    pub fn name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    pub fn is_banned(&self) -> bool {
        self.status == UserStatus::Ban
    }
}

impl Resource for User {
    const PATH: &'static str = USERS_PATH;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub display_name: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub status: UserStatus,
}

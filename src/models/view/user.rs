use serde::{Deserialize, Serialize};

use crate::entities::user::{User, UserRole, UserStatus};
use crate::utils::jwt::Claims;

/// A user as shown to clients; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub ban_reason: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            display_name: user.name().to_string(),
            id: user.id,
            username: user.username,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            avatar: user.avatar,
            role: user.role,
            status: user.status,
            ban_reason: user.ban_reason,
        }
    }
}

/// Short author card embedded in article and comment views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: String,
    pub display_name: String,
    pub avatar: Option<String>,
}

impl AuthorView {
    pub fn of(user: &User) -> Self {
        AuthorView {
            id: user.id.clone(),
            display_name: user.name().to_string(),
            avatar: user.avatar.clone(),
        }
    }

    pub fn unknown(user_id: &str) -> Self {
        AuthorView {
            id: user_id.to_string(),
            display_name: "Unknown".to_string(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    pub expires_at: usize,
}

impl From<Claims> for SessionView {
    fn from(claims: Claims) -> Self {
        SessionView {
            user_id: claims.auth,
            username: claims.username,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginView {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStatsView {
    pub total_articles: usize,
    pub public_articles: usize,
    pub private_articles: usize,
    pub total_likes: usize,
    pub total_comments: usize,
}

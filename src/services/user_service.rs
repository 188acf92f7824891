use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumString};
use tracing::info;
use validator::Validate;

use crate::{
    backend::query_builder::QueryFilter,
    entities::user::{User, UserStatus},
    middleware::error::{AppError, AppResult},
    models::view::user::{ProfileStatsView, UserView},
    store::AppStore,
    utils::{
        pagination::{paginate, Page, ADMIN_USERS_PAGE_SIZE},
        validate_utils::validate_not_blank,
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(custom(function = validate_not_blank))]
    pub display_name: Option<String>,
    #[validate(email(message = "Must be a valid email"))]
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Deserialize, Default)]
pub struct AdminUsersParams {
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Default, Validate)]
pub struct BlockUserInput {
    #[validate(length(max = 500, message = "Max 500 characters"))]
    pub reason: Option<String>,
}

pub struct UserService<'a> {
    store: &'a AppStore,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a AppStore) -> Self {
        Self { store }
    }

    /// Sessions outlive a ban, so writes look the account up again.
    pub async fn ensure_active(&self, user_id: &str) -> AppResult<User> {
        let user = self.store.users.find(user_id).await?;
        if user.is_banned() {
            return Err(AppError::AccountBanned {
                reason: user.ban_reason.clone(),
            });
        }
        Ok(user)
    }

    pub async fn profile(&self, user_id: &str) -> AppResult<User> {
        self.store.users.find(user_id).await
    }

    pub async fn update_profile(&self, user_id: &str, input: UpdateProfileInput) -> AppResult<User> {
        input.validate()?;
        let mut user = self.store.users.find(user_id).await?;

        if let Some(email) = input.email.map(|e| e.trim().to_string()) {
            if email != user.email {
                let taken = self
                    .store
                    .users
                    .fetch_where(&QueryFilter::new().eq("email", &email))
                    .await?
                    .iter()
                    .any(|u| u.id != user.id);
                if taken {
                    return Err(AppError::Generic {
                        description: "The email is already used".to_string(),
                    });
                }
                user.email = email;
            }
        }
        if let Some(display_name) = input.display_name {
            user.display_name = Some(display_name.trim().to_string());
        }
        if let Some(avatar) = input.avatar {
            user.avatar = Some(avatar).filter(|a| !a.trim().is_empty());
        }

        self.store.users.update(&user).await
    }

    pub async fn stats(&self, user_id: &str) -> AppResult<ProfileStatsView> {
        let by_user = QueryFilter::new().eq("userId", user_id);
        let (articles, comments, likes) = tokio::try_join!(
            self.store.articles.fetch_where(&by_user),
            self.store.comments.fetch_where(&by_user),
            self.store.likes.fetch_all(),
        )?;

        let public_articles = articles.iter().filter(|a| a.is_public()).count();
        let total_likes = likes
            .iter()
            .filter(|like| articles.iter().any(|a| a.id == like.article_id))
            .count();

        Ok(ProfileStatsView {
            total_articles: articles.len(),
            public_articles,
            private_articles: articles.len() - public_articles,
            total_likes,
            total_comments: comments.len(),
        })
    }

    /// Admin user table: search on name or email, sort by name.
    pub async fn admin_list(&self, params: AdminUsersParams) -> AppResult<Page<UserView>> {
        let term = params
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        let mut users: Vec<User> = self
            .store
            .users
            .fetch_all()
            .await?
            .into_iter()
            .filter(|u| {
                term.is_empty()
                    || u.name().to_lowercase().contains(&term)
                    || u.email.to_lowercase().contains(&term)
            })
            .collect();

        users.sort_by(|a, b| {
            let ord = a.name().to_lowercase().cmp(&b.name().to_lowercase());
            match params.sort {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        Ok(paginate(users, params.page, ADMIN_USERS_PAGE_SIZE).map(UserView::from))
    }

    pub async fn block(
        &self,
        admin_id: &str,
        user_id: &str,
        input: BlockUserInput,
    ) -> AppResult<User> {
        input.validate()?;
        if admin_id == user_id {
            return Err(AppError::Generic {
                description: "You cannot block yourself".to_string(),
            });
        }
        let reason = input
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let user = self
            .store
            .users
            .patch(
                user_id,
                json!({"status": UserStatus::Ban, "banReason": reason}),
            )
            .await?;
        info!("user {user_id} blocked by {admin_id}");
        Ok(user)
    }

    pub async fn unblock(&self, user_id: &str) -> AppResult<User> {
        self.store
            .users
            .patch(
                user_id,
                json!({"status": UserStatus::Active, "banReason": null}),
            )
            .await
    }
}

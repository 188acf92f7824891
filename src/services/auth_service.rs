use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    backend::query_builder::QueryFilter,
    entities::user::{CreateUser, User, UserRole, UserStatus},
    middleware::error::{AppError, AppResult},
    store::AppStore,
    utils::{
        hash::{hash_password, verify_password},
        jwt::JWT,
        validate_utils::{trim_string, validate_not_blank},
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthRegisterInput {
    #[serde(alias = "firstName", deserialize_with = "trim_string")]
    #[validate(custom(function = validate_not_blank))]
    pub firstname: String,
    #[serde(alias = "lastName", deserialize_with = "trim_string")]
    #[validate(custom(function = validate_not_blank))]
    pub lastname: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Min 3 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
    #[serde(alias = "confirmPassword")]
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

impl AuthRegisterInput {
    /// Explicit username, or the local part of the email.
    fn username(&self) -> String {
        match self.username.as_deref().map(str::trim) {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthLoginInput {
    #[serde(alias = "emailOrUserName", deserialize_with = "trim_string")]
    #[validate(custom(function = validate_not_blank))]
    pub email_or_username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub struct AuthService<'a> {
    store: &'a AppStore,
    jwt: &'a JWT,
}

impl<'a> AuthService<'a> {
    pub fn new(store: &'a AppStore, jwt: &'a JWT) -> AuthService<'a> {
        AuthService { store, jwt }
    }

    pub async fn register(&self, input: AuthRegisterInput) -> AppResult<User> {
        input.validate()?;
        let username = input.username();

        let by_email = QueryFilter::new().eq("email", &input.email);
        let by_username = QueryFilter::new().eq("username", &username);
        let (same_email, same_username) = tokio::try_join!(
            self.store.users.fetch_where(&by_email),
            self.store.users.fetch_where(&by_username),
        )?;
        if !same_email.is_empty() {
            return Err(AppError::Generic {
                description: "The email is already used".to_string(),
            });
        }
        if !same_username.is_empty() {
            return Err(AppError::Generic {
                description: "The username is already used".to_string(),
            });
        }

        let user = self
            .store
            .users
            .create(&CreateUser {
                display_name: format!("{} {}", input.firstname, input.lastname),
                username,
                firstname: input.firstname,
                lastname: input.lastname,
                email: input.email,
                password: hash_password(&input.password)?,
                role: UserRole::User,
                status: UserStatus::Active,
            })
            .await?;
        info!("registered user {} as {}", user.id, user.username);
        Ok(user)
    }

    /// Email match first, then username; usernames may contain '@' too.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let by_email = QueryFilter::new().eq("email", login);
        if let Some(user) = self.store.users.fetch_where(&by_email).await?.into_iter().next() {
            return Ok(Some(user));
        }
        let by_username = QueryFilter::new().eq("username", login);
        Ok(self
            .store
            .users
            .fetch_where(&by_username)
            .await?
            .into_iter()
            .next())
    }

    pub async fn login(&self, input: AuthLoginInput) -> AppResult<(String, User)> {
        input.validate()?;

        let user = self
            .find_by_login(&input.email_or_username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !verify_password(&user.password, &input.password) {
            return Err(AppError::AuthenticationFail);
        }
        if user.is_banned() {
            return Err(AppError::AccountBanned {
                reason: user.ban_reason.clone(),
            });
        }

        let token = self.jwt.create_by_login(&user)?;
        Ok((token, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_input() -> AuthRegisterInput {
        AuthRegisterInput {
            firstname: "Anna".to_string(),
            lastname: "Karenina".to_string(),
            email: "anna@mail.com".to_string(),
            username: None,
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn username_falls_back_to_email() {
        assert_eq!(register_input().username(), "anna");
        let input = AuthRegisterInput {
            username: Some(" annak ".to_string()),
            ..register_input()
        };
        assert_eq!(input.username(), "annak");
    }

    #[test]
    fn register_requires_matching_passwords() {
        assert!(register_input().validate().is_ok());
        let input = AuthRegisterInput {
            confirm_password: "secret2".to_string(),
            ..register_input()
        };
        assert!(input.validate().is_err());
        let input = AuthRegisterInput {
            email: "not-an-email".to_string(),
            ..register_input()
        };
        assert!(input.validate().is_err());
    }
}

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::entities::user::{User, UserRole};
use crate::middleware::error::AppResult;

/// The signed session blob. Role gating reads `role` from here without a
/// backend round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub auth: String,
    pub username: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

pub struct JWT {
    key_enc: EncodingKey,
    key_dec: DecodingKey,
    duration: TimeDelta,
}

impl JWT {
    pub fn new(secret: String, duration: TimeDelta) -> Self {
        Self {
            duration,
            key_enc: EncodingKey::from_secret(secret.as_ref()),
            key_dec: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn create_by_login(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            auth: user.id.clone(),
            username: user.name().to_string(),
            role: user.role,
            exp: (now + self.duration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.key_enc)?)
    }

    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.key_dec, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::UserStatus;
    use chrono::Duration;

    fn user(role: UserRole) -> User {
        User {
            id: "5".to_string(),
            username: "anna".to_string(),
            display_name: Some("Anna K".to_string()),
            firstname: None,
            lastname: None,
            email: "anna@mail.com".to_string(),
            password: "hash".to_string(),
            avatar: None,
            role,
            status: UserStatus::Active,
            ban_reason: None,
        }
    }

    #[test]
    fn sign_and_verify_carries_role() {
        let jwt = JWT::new("secret".to_string(), Duration::minutes(5));
        let token = jwt.create_by_login(&user(UserRole::Master)).unwrap();
        let claims = jwt.decode(&token).unwrap();
        assert_eq!(claims.auth, "5");
        assert_eq!(claims.username, "Anna K");
        assert_eq!(claims.role, UserRole::Master);
    }

    #[test]
    fn expired_token_fails() {
        let jwt = JWT::new("secret".to_string(), Duration::days(-1));
        let token = jwt.create_by_login(&user(UserRole::User)).unwrap();
        assert!(jwt.decode(&token).is_err());
    }

    #[test]
    fn foreign_secret_fails() {
        let jwt = JWT::new("secret".to_string(), Duration::minutes(5));
        let other = JWT::new("other".to_string(), Duration::minutes(5));
        let token = other.create_by_login(&user(UserRole::Admin)).unwrap();
        assert!(jwt.decode(&token).is_err());
    }
}

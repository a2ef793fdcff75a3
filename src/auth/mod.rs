use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

pub mod credentials;
pub mod password;

pub use credentials::Credentials;
pub use password::{hash_password, verify_password, PasswordError};

/// Claims carried by bearer tokens. `sub` is the user name at login time;
/// `_id` is what the bearer strategy resolves against the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(rename = "_id")]
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails instead of wrapping when `expiry_hours` pushes `exp` past the representable range.
    pub fn new(user: &User, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(JwtError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            sub: user.name.clone(),
            user_id: user.id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidExpiry(u64),
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Check signature and expiry, returning the claims.
pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::models::UserChanges;

    fn user() -> User {
        UserChanges {
            name: "alice".to_string(),
            password: "hash".to_string(),
            email: "alice@example.com".to_string(),
            birthday: None,
        }
        .into_user(Uuid::new_v4())
    }

    #[test]
    fn issued_token_names_the_user() {
        let security = AppConfig::development().security;
        let user = user();
        let token = generate_jwt(&Claims::new(&user, security.jwt_expiry_hours).unwrap(), &security).unwrap();

        let claims = validate_jwt(&token, &security).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let security = AppConfig::development().security;
        let mut other = security.clone();
        other.jwt_secret = "another-secret".to_string();

        let token = generate_jwt(&Claims::new(&user(), 1).unwrap(), &other).unwrap();
        assert!(matches!(validate_jwt(&token, &security), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let security = AppConfig::development().security;
        let mut claims = Claims::new(&user(), 1).unwrap();
        claims.iat -= 3 * 3600;
        claims.exp = claims.iat + 3600;

        let token = generate_jwt(&claims, &security).unwrap();
        assert!(validate_jwt(&token, &security).is_err());
    }

    #[test]
    fn refuses_empty_secret() {
        let mut security = AppConfig::development().security;
        security.jwt_secret.clear();
        assert!(matches!(
            generate_jwt(&Claims::new(&user(), 1).unwrap(), &security),
            Err(JwtError::InvalidSecret)
        ));
    }

    #[test]
    fn oversized_lifetime_is_an_error() {
        assert!(matches!(
            Claims::new(&user(), 10_000_000_000),
            Err(JwtError::InvalidExpiry(10_000_000_000))
        ));
        assert!(matches!(Claims::new(&user(), u64::MAX), Err(JwtError::InvalidExpiry(_))));
    }
}

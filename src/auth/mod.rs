use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRY_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per RFC 7519
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        let minutes = expiry_minutes.min(MAX_EXPIRY_MINUTES);
        let exp = (now + Duration::minutes(minutes)).timestamp();

        Self {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Signing material for identity tokens
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_minutes: i64,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8], expiry_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            expiry_minutes,
        }
    }

    /// Keys from the configured secret, or from 32 random bytes that live only as
    /// long as this process. In the latter case every token dies with a restart.
    pub fn from_config(security: &SecurityConfig) -> Self {
        match &security.jwt_secret {
            Some(secret) => Self::from_secret(secret.as_bytes(), security.jwt_expiry_minutes),
            None => {
                tracing::warn!(
                    "HRDOCS_JWT_SECRET not set; using a random per-process secret, tokens will not survive a restart"
                );
                let mut secret = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut secret);
                Self::from_secret(&secret, security.jwt_expiry_minutes)
            }
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, self.expiry_minutes);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature and expiry, returning the claims
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("expiry_minutes", &self.expiry_minutes)
            .finish_non_exhaustive()
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// A malformed stored hash counts as a mismatch rather than an error
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"unit-test-secret", 15)
    }

    #[test]
    fn issued_token_validates_to_same_user() {
        let keys = keys();
        let token = keys.issue(42).unwrap();
        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenKeys::from_secret(b"someone-else", 15).issue(1).unwrap();
        assert!(matches!(keys().validate(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = TokenKeys::from_secret(b"unit-test-secret", -5);
        let token = expired.issue(7).unwrap();
        assert!(keys().validate(&token).is_err());
    }

    #[test]
    fn huge_expiry_is_capped() {
        let claims = Claims::new(1, i64::MAX);
        assert_eq!(claims.exp - claims.iat, MAX_EXPIRY_MINUTES * 60);

        let keys = TokenKeys::from_secret(b"unit-test-secret", i64::MAX);
        let token = keys.issue(5).unwrap();
        assert_eq!(keys.validate(&token).unwrap().user_id().unwrap(), 5);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(keys().validate("not.a.jwt").is_err());
    }

    #[test]
    fn random_secrets_differ_between_instances() {
        let security = crate::config::AppConfig::development().security;
        let token = TokenKeys::from_config(&security).issue(3).unwrap();
        assert!(TokenKeys::from_config(&security).validate(&token).is_err());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("pw1", 4).unwrap();
        assert_ne!(hash, "pw1");
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("pw2", &hash));
        assert!(!verify_password("pw1", "not-a-bcrypt-hash"));
    }
}

//! Session token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs; the server keeps no record of issued
//! tokens. There is no refresh mechanism, an expired token forces a fresh
//! login, and logout cannot revoke a token that is already in the wild.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::Role;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid token")]
pub struct InvalidToken(#[source] jsonwebtoken::errors::Error);

/// Signs and verifies session tokens with a server-side secret.
pub struct TokenService {
    secret: SecretString,
    ttl_minutes: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: SecretString, ttl_minutes: i64) -> Self {
        Self {
            secret,
            ttl_minutes,
        }
    }

    /// Issue a signed token for the given subject.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue(&self, sub: Uuid, role: Role, email: &str) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub,
            role,
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl_minutes * 60,
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::default(), &claims, &key).map_err(Into::into)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// Returns [`InvalidToken`] for malformed, tampered, or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(InvalidToken)
    }
}

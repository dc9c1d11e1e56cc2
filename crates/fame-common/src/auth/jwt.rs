//! Session tokens
//!
//! Signed HS256 bearer tokens embedding `{id, username, role}`. Tokens are not revocable
//! server-side; logout is an acknowledgement only and a token stays valid until `exp`.

use chrono::{Duration, Utc};
use fame_core::{Identity, Role};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub username: String,
    /// Role at issue time; callers re-resolve it from storage
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// JWT service for issuing and decoding session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry: i64,
    remember_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service
    ///
    /// `session_expiry` applies to ordinary logins and registrations, `remember_expiry`
    /// to logins with "remember me". Both are in seconds.
    #[must_use]
    pub fn new(secret: &str, session_expiry: i64, remember_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiry,
            remember_expiry,
        }
    }

    /// Token lifetime in seconds
    fn expiry_for(&self, remember: bool) -> i64 {
        if remember {
            self.remember_expiry
        } else {
            self.session_expiry
        }
    }

    /// Issue a token for an identity
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, identity: &Identity, remember: bool) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.expiry_for(remember));

        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` for an expired signature and `InvalidToken` otherwise
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_expiry", &self.session_expiry)
            .field("remember_expiry", &self.remember_expiry)
            .finish_non_exhaustive()
    }
}

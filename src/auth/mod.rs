pub mod actor;
pub mod cookie;
pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::User;

pub use actor::Actor;
pub use password::{generate_one_time_password, PasswordService};

/// Sessions are valid for a fixed window from issuance
pub const SESSION_TTL_HOURS: i64 = 24;

/// Authentication and authorization failures raised by the access guard
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authorized, no token")]
    Unauthenticated,

    #[error("Not authorized, token failed")]
    InvalidToken,

    #[error("Invalid token format")]
    MalformedToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Role mismatch")]
    RoleMismatch,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

/// Signed session payload. Subject and role are optional on decode so a
/// token that verifies but lacks them can be reported as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "campusId", default, skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_user(user: &User) -> Self {
        let now = Utc::now();
        Self {
            id: Some(user.id.to_string()),
            role: Some(user.role.to_string()),
            campus_id: user.campus_id.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        }
    }
}

/// HS256 token issuer and verifier bound to one process-wide secret
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionIssuer {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.sign(&SessionClaims::for_user(user))
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Checks signature and expiry
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {}", e);
                AuthError::InvalidToken
            })
    }
}

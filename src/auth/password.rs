use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;

use super::AuthError;
use crate::config::SecurityConfig;

pub const ONE_TIME_PASSWORD_LENGTH: usize = 8;

/// Argon2id hashing with the cost parameters from configuration. Hashing and
/// verification run on tokio's blocking pool.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    decoy_hash: Arc<str>,
}

impl PasswordService {
    pub fn new(config: &SecurityConfig) -> Result<Self, AuthError> {
        let params = Params::new(config.hash_memory_kib, config.hash_iterations, 1, None)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy = generate_one_time_password();
        let decoy_hash = hash_with(&argon2, &decoy)?;
        Ok(Self { argon2, decoy_hash: decoy_hash.into() })
    }

    pub async fn hash(&self, plain: &str) -> Result<String, AuthError> {
        let argon2 = self.argon2.clone();
        let plain = plain.to_string();
        tokio::task::spawn_blocking(move || hash_with(&argon2, &plain))
            .await
            .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
    }

    /// False for a wrong password and for a stored value that is not a hash
    pub async fn verify(&self, plain: &str, stored: &str) -> bool {
        let argon2 = self.argon2.clone();
        let plain = plain.to_string();
        let stored = stored.to_string();
        let verified = tokio::task::spawn_blocking(move || match PasswordHash::new(&stored) {
            Ok(parsed) => argon2.verify_password(plain.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        })
        .await;

        match verified {
            Ok(ok) => ok,
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Hash of a random secret with the configured cost. Logins for unknown
    /// emails verify against it so they cost the same as a wrong password.
    pub fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }

    /// Values already in PHC form are stored as given
    pub async fn hash_if_needed(&self, value: &str) -> Result<String, AuthError> {
        if is_hashed(value) {
            Ok(value.to_string())
        } else {
            self.hash(value).await
        }
    }
}

fn hash_with(argon2: &Argon2<'static>, plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn is_hashed(value: &str) -> bool {
    PasswordHash::new(value).is_ok()
}

/// Eight symbols drawn uniformly from `[A-Za-z0-9]`
pub fn generate_one_time_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ONE_TIME_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ServiceError;
use crate::auth::{Actor, AuthError, PasswordService, SessionIssuer};
use crate::database::models::User;
use crate::database::UserStore;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordInput {
    pub email: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

pub struct SessionService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    issuer: SessionIssuer,
}

impl SessionService {
    pub fn new(users: Arc<dyn UserStore>, passwords: PasswordService, issuer: SessionIssuer) -> Self {
        Self { users, passwords, issuer }
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, ServiceError> {
        let (Some(email), Some(password)) = (
            input.email.filter(|e| !e.is_empty()),
            input.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(ServiceError::validation("Email and password are required"));
        };

        // Unknown emails still pay for one verification against the decoy hash
        let found = self.users.find_by_email(&email).await?;
        let stored = found.as_ref().map_or(self.passwords.decoy_hash(), |u| u.password.as_str());
        let verified = self.passwords.verify(&password, stored).await;

        let Some(user) = found else {
            warn!("Login refused for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verified {
            warn!("Login refused for {}: wrong password", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issuer.issue(&user)?;
        info!("User {} logged in", user.id);
        Ok(LoginOutcome { user, token })
    }

    pub async fn reset_password(&self, actor: &Actor, input: ResetPasswordInput) -> Result<(), ServiceError> {
        let email = input
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ServiceError::validation("Email is required"))?;
        actor.verify_ownership(&email)?;

        let (Some(new_password), Some(confirm)) = (input.new_password, input.confirm_password) else {
            return Err(ServiceError::validation("New password and confirmation are required"));
        };
        if new_password != confirm {
            return Err(ServiceError::validation("Passwords do not match"));
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        let mut user = self
            .users
            .find_by_id(actor.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        user.password = self.passwords.hash(&new_password).await?;
        self.users.update(&user).await?.ok_or(AuthError::UserNotFound)?;

        info!("User {} reset their password", actor.user_id);
        Ok(())
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::error::ServiceError;
use crate::auth::{generate_one_time_password, PasswordService};
use crate::database::models::User;
use crate::database::{DatabaseError, UserStore};
use crate::types::{Role, UserStatus};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

pub const EMAIL_TAKEN: &str = "Email is already registered";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAdminInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub campus_id: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub campus_id: Option<String>,
    pub status: Option<String>,
}

/// Operator-supplied SuperAdmin; `password` may already be a PHC hash
#[derive(Debug, Clone)]
pub struct SuperAdminInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Result of provisioning. The plaintext password exists only here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedAccount {
    pub email: String,
    pub generated_password: String,
    pub user: User,
}

pub struct AdminService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
}

impl AdminService {
    pub fn new(users: Arc<dyn UserStore>, passwords: PasswordService) -> Self {
        Self { users, passwords }
    }

    pub async fn assign_admin(&self, input: AssignAdminInput) -> Result<ProvisionedAccount, ServiceError> {
        let role = parse_role(input.role.as_deref())?;
        let email = required(input.email, "Email is required")?;
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("Please provide a valid email address"));
        }
        let first_name = required(input.first_name, "First name is required")?;
        let last_name = required(input.last_name, "Last name is required")?;
        let campus_id = input.campus_id.filter(|c| !c.trim().is_empty());
        if role == Role::Admin && campus_id.is_none() {
            return Err(ServiceError::validation("Campus ID is required for Admin accounts"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::conflict(EMAIL_TAKEN));
        }

        let password = generate_one_time_password();
        let hash = self.passwords.hash(&password).await?;
        let user = User::new(first_name, last_name, email, hash, role, campus_id, UserStatus::Active);
        self.users.insert(&user).await.map_err(email_conflict)?;

        info!("Provisioned {} account {} ({})", user.role, user.email, user.id);
        Ok(ProvisionedAccount {
            email: user.email.clone(),
            generated_password: password,
            user,
        })
    }

    /// Creates an active SuperAdmin with a chosen password (CLI and startup bootstrap)
    pub async fn create_super_admin(&self, input: SuperAdminInput) -> Result<User, ServiceError> {
        if !is_valid_email(&input.email) {
            return Err(ServiceError::validation("Please provide a valid email address"));
        }
        let first_name = required(Some(input.first_name), "First name is required")?;
        let last_name = required(Some(input.last_name), "Last name is required")?;
        if input.password.is_empty() {
            return Err(ServiceError::validation("Password is required"));
        }

        let hash = self.passwords.hash_if_needed(&input.password).await?;
        let user = User::new(first_name, last_name, input.email, hash, Role::SuperAdmin, None, UserStatus::Active);
        self.users.insert(&user).await.map_err(email_conflict)?;

        info!("Created SuperAdmin account {} ({})", user.email, user.id);
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.list().await?)
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUserInput) -> Result<User, ServiceError> {
        let mut user = self.find(id).await?;

        if let Some(first_name) = input.first_name {
            user.first_name = required(Some(first_name), "First name is required")?;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = required(Some(last_name), "Last name is required")?;
        }
        if let Some(email) = input.email {
            if !is_valid_email(&email) {
                return Err(ServiceError::validation("Please provide a valid email address"));
            }
            user.email = email;
        }
        if input.role.is_some() {
            user.role = parse_role(input.role.as_deref())?;
        }
        if let Some(campus_id) = input.campus_id {
            user.campus_id = Some(campus_id).filter(|c| !c.trim().is_empty());
        }
        if let Some(status) = input.status {
            user.status = status.parse::<UserStatus>().map_err(ServiceError::Validation)?;
        }

        match user.role {
            Role::SuperAdmin => user.campus_id = None,
            Role::Admin if user.campus_id.is_none() => {
                return Err(ServiceError::validation("Campus ID is required for Admin accounts"));
            }
            Role::Admin => {}
        }

        let updated = self
            .users
            .update(&user)
            .await
            .map_err(email_conflict)?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        info!("Updated account {} ({})", updated.email, updated.id);
        Ok(updated)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.users.delete(id).await? {
            return Err(ServiceError::NotFound("User not found".into()));
        }
        info!("Deleted account {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<User, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))
    }
}

fn parse_role(raw: Option<&str>) -> Result<Role, ServiceError> {
    match raw.filter(|r| !r.trim().is_empty()) {
        Some(r) => r.parse::<Role>().map_err(ServiceError::Validation),
        None => Err(ServiceError::validation("Role is required")),
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, ServiceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::validation(message))
}

fn email_conflict(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::Conflict(_) => ServiceError::conflict(EMAIL_TAKEN),
        other => other.into(),
    }
}

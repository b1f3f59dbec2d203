use uuid::Uuid;

use super::AuthError;
use crate::types::{Role, UserStatus};

/// Authenticated principal attached to each request after the guard re-validates it
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub campus_id: Option<String>,
    pub status: UserStatus,
}

impl Actor {
    /// Role names compare case-insensitively
    pub fn authorize(&self, allowed: &[Role]) -> Result<(), AuthError> {
        let role = self.role.as_str();
        if allowed.iter().any(|r| r.as_str().eq_ignore_ascii_case(role)) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(format!(
                "Role {} is not allowed to perform this action",
                role
            )))
        }
    }

    /// Exact, case-sensitive email match
    pub fn verify_ownership(&self, target_email: &str) -> Result<(), AuthError> {
        if self.email == target_email {
            Ok(())
        } else {
            Err(AuthError::Forbidden("You can only reset your own password".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            email: "me@example.com".into(),
            role,
            campus_id: Some("north".into()),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn authorize_checks_membership() {
        assert!(actor(Role::Admin).authorize(&[Role::Admin, Role::SuperAdmin]).is_ok());
        assert!(matches!(
            actor(Role::Admin).authorize(&[Role::SuperAdmin]),
            Err(AuthError::Forbidden(_))
        ));
    }

    #[test]
    fn ownership_is_case_sensitive() {
        let me = actor(Role::Admin);
        assert!(me.verify_ownership("me@example.com").is_ok());
        assert!(me.verify_ownership("Me@example.com").is_err());
        assert!(me.verify_ownership("other@example.com").is_err());
    }
}

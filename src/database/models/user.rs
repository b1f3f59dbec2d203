use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::{Role, UserStatus};

/// Administrative account. `password` holds the PHC hash string and is never serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        role: Role,
        campus_id: Option<String>,
        status: UserStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password: password_hash,
            // SuperAdmins are campus-less; the value is dropped rather than stored
            campus_id: if role == Role::SuperAdmin { None } else { campus_id },
            role,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_campus_is_dropped() {
        let user = User::new(
            "Ada".into(),
            "Root".into(),
            "ada@example.com".into(),
            "$argon2id$stub".into(),
            Role::SuperAdmin,
            Some("main".into()),
            UserStatus::Active,
        );
        assert!(user.campus_id.is_none());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User::new(
            "Bo".into(),
            "Admin".into(),
            "bo@example.com".into(),
            "$argon2id$secret-hash".into(),
            Role::Admin,
            Some("north".into()),
            UserStatus::Active,
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["campusId"], "north");
        assert_eq!(json["role"], "Admin");
        assert_eq!(json["status"], "active");
    }
}

/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative role carried by every account and embedded in session claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SuperAdmin" => Ok(Role::SuperAdmin),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("Invalid role specified: {}", other)),
        }
    }
}

/// Account status; only `active` accounts may create partnerships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(format!("Invalid user status: {}", other)),
        }
    }
}

/// Partnership lifecycle status. Archiving is a separate flag, not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartnershipStatus {
    #[default]
    Pending,
    Active,
    Rejected,
}

impl PartnershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnershipStatus::Pending => "Pending",
            PartnershipStatus::Active => "Active",
            PartnershipStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for PartnershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PartnershipStatus::Pending),
            "Active" => Ok(PartnershipStatus::Active),
            "Rejected" => Ok(PartnershipStatus::Rejected),
            _ => Err("Invalid status. Must be one of: Active, Rejected, or Pending".to_string()),
        }
    }
}

/// Lifecycle actions that move a partnership between statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject,
}

impl Transition {
    pub fn target(&self) -> PartnershipStatus {
        match self {
            Transition::Approve => PartnershipStatus::Active,
            Transition::Reject => PartnershipStatus::Rejected,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Transition::Approve => "approved",
            Transition::Reject => "rejected",
        }
    }
}

/// Tenant key assigned to partnerships created by a SuperAdmin
pub const DEFAULT_CAMPUS: &str = "default_campus";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partnership_status_rejects_unknown_values() {
        assert_eq!("Active".parse::<PartnershipStatus>(), Ok(PartnershipStatus::Active));
        assert!("active".parse::<PartnershipStatus>().is_err());
        assert!("Archived".parse::<PartnershipStatus>().is_err());
    }

    #[test]
    fn role_round_trips_through_display() {
        for role in [Role::SuperAdmin, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert!("User".parse::<Role>().is_err());
    }
}

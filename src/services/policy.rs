//! Pure access and lifecycle predicates shared by every partnership operation.

use super::error::ServiceError;
use crate::auth::Actor;
use crate::filter::TenantScope;
use crate::types::{PartnershipStatus, Role, Transition};

pub const NOT_IN_CAMPUS: &str = "Partnership not found or not in your campus";
pub const OTHER_AREA_TAG: &str = "Other";

/// SuperAdmins see every campus; everyone else sees only their own
pub fn tenant_filter(actor: &Actor) -> TenantScope {
    match (&actor.role, &actor.campus_id) {
        (Role::SuperAdmin, _) => TenantScope::Global,
        (_, Some(campus)) if !campus.is_empty() => TenantScope::Campus(campus.clone()),
        _ => TenantScope::Nothing,
    }
}

/// Approve and reject both start from Pending; Active and Rejected are terminal
pub fn can_transition(current: PartnershipStatus, action: Transition, role: Role) -> bool {
    let permitted = match action {
        Transition::Approve | Transition::Reject => matches!(role, Role::Admin | Role::SuperAdmin),
    };
    permitted && current == PartnershipStatus::Pending
}

pub fn transition_refused(action: Transition) -> ServiceError {
    ServiceError::conflict(format!("Only pending partnerships can be {}", action.verb()))
}

/// Selecting the "Other" tag requires the free-text area to be filled in
pub fn check_collaboration_areas(areas: &[String], other: Option<&str>) -> Result<(), ServiceError> {
    let has_other = areas.iter().any(|a| a == OTHER_AREA_TAG);
    let justified = other.is_some_and(|text| !text.trim().is_empty());
    if has_other && !justified {
        return Err(ServiceError::validation(
            "Other collaboration area is required when 'Other' is selected",
        ));
    }
    Ok(())
}

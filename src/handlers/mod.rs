// handlers/mod.rs - 3-tier handler layout
//
// Public (no auth) → Protected (session auth + user re-validation) → Elevated (SuperAdmin)
pub mod public;
pub mod protected;
pub mod elevated;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids must be UUIDs; anything else is a client error, not a lookup miss
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}

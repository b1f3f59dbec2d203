// handlers/protected/partnerships/mod.rs - /partnerships routes
//
// Every handler derives the tenant scope from the Actor; ids outside the
// caller's campus behave exactly like missing ids.

pub mod lifecycle;
pub mod record;

pub use lifecycle::{partnership_approve, partnership_archive, partnership_reject, partnership_renew};
pub use record::{
    partnership_create, partnership_delete, partnership_export, partnership_get, partnership_list,
    partnership_update,
};

use uuid::Uuid;

use crate::error::ApiError;

fn partnership_id(raw: &str) -> Result<Uuid, ApiError> {
    crate::handlers::parse_id(raw, "partnership")
}

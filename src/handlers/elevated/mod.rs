// handlers/elevated/mod.rs - SuperAdmin-only handlers
//
// Same session middlewares as the protected tier plus `require_super_admin`.

pub mod admin;

// handlers/protected/mod.rs - handlers behind session auth
//
// Middleware applied to every route here:
//   session_auth_middleware   → token from bearer header or `jwt` cookie
//   validate_user_middleware  → user re-fetched, role re-checked, Actor inserted

pub mod partnerships;
pub mod session;

pub mod auth;
pub mod response;
pub mod validate_user;

pub use auth::session_auth_middleware;
pub use response::{message, ApiResponse, ApiResult};
pub use validate_user::{require_super_admin, validate_user_middleware};

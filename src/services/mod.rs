pub mod admin;
pub mod error;
pub mod partnership;
pub mod policy;
pub mod session;

pub use admin::AdminService;
pub use error::ServiceError;
pub use partnership::PartnershipService;
pub use session::SessionService;

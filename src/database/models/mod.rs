pub mod partnership;
pub mod user;

pub use partnership::{ContactPerson, Partnership, PartnerInstitution, UniversityContact};
pub use user::User;

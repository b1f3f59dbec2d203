// handlers/elevated/admin/mod.rs - account provisioning and unscoped views

pub mod partnerships;
pub mod users;

pub use partnerships::partnership_list_all;
pub use users::{user_create, user_delete, user_list, user_update};

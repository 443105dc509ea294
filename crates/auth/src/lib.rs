//! `atlas-auth`: pure session identity and permission model.
//!
//! This crate is intentionally decoupled from HTTP and from the stores that
//! hold session state; it only answers "does this permission set allow X".

pub mod authorize;
pub mod permission_set;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{AuthzError, authorize};
pub use permission_set::PermissionSet;
pub use permissions::Permission;
pub use roles::Role;
pub use user::SessionUser;

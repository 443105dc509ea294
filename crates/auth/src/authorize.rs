use thiserror::Error;

use crate::{Permission, PermissionSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No permissions are known for the session (not loaded, or none granted).
    #[error("no permissions loaded for the current session")]
    NoPermissions,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Decide whether `granted` allows `required`.
///
/// - No IO
/// - No panics
/// - Fails closed: an empty set denies every permission.
pub fn authorize(granted: &PermissionSet, required: &Permission) -> Result<(), AuthzError> {
    if granted.is_empty() {
        return Err(AuthzError::NoPermissions);
    }

    if granted.allows(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.clone()))
    }
}

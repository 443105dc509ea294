//! Signed-in user as returned by `GET /api/user`.

use serde::{Deserialize, Serialize};

use atlas_core::UserId;

use crate::{Permission, PermissionSet, Role};

/// The authenticated user behind the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub roles: Vec<Role>,

    /// Some backends embed the permission list in the user payload; when
    /// present it seeds the RBAC store without a second request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

impl SessionUser {
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(Role::name).collect()
    }

    /// Embedded permissions, if the payload carried any.
    pub fn embedded_permissions(&self) -> Option<PermissionSet> {
        self.permissions
            .as_ref()
            .map(|perms| perms.iter().cloned().collect())
    }
}

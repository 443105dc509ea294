use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Set of permission names granted to the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Membership check; the wildcard grants every permission.
    pub fn allows(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|p| p.is_wildcard() || p.as_str() == name)
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(Permission::is_wildcard)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Permission names, sorted for stable display and logging.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.iter().map(|p| p.as_str().to_string()).collect();
        names.sort();
        names
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

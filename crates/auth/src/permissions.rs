use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "vendors.read").
/// The wildcard permission `"*"` grants everything; the backend hands it to
/// administrators instead of enumerating every permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: &'static str = "*";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == Self::WILDCARD
    }

    /// Human-readable action for notifications, e.g. `"vendors.read"` →
    /// `"view vendors"`.
    ///
    /// Names that do not follow the `resource.action` format are returned
    /// verbatim.
    pub fn describe(&self) -> String {
        if self.is_wildcard() {
            return "perform any action".to_string();
        }

        let parts: Vec<&str> = self.as_str().split('.').collect();
        if parts.len() < 2 {
            return self.as_str().to_string();
        }

        let action = parts[parts.len() - 1];
        let resource = parts[..parts.len() - 1].join(" ").replace('_', " ");

        let verb = match action {
            "read" | "view" | "list" => "view",
            "write" | "update" => "edit",
            "create" => "create",
            "delete" => "delete",
            "manage" => "manage",
            "approve" => "approve",
            other => other,
        };

        format!("{verb} {resource}")
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

//! Role labels attached to the session user.

use serde::{Deserialize, Deserializer, Serialize};

/// A role granted to the session user, e.g. `accountant`.
///
/// The backend resolves roles to permissions; the client only carries the
/// names for display and logging. Payloads list roles either as bare names
/// or as `{ "name": ... }` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Role(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RolePayload {
    Name(String),
    Record { name: String },
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RolePayload::deserialize(deserializer)? {
            RolePayload::Name(name) | RolePayload::Record { name } => Role(name),
        })
    }
}

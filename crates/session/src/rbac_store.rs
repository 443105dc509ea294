//! Permission set of the current session.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use atlas_auth::{Permission, PermissionSet};
use atlas_client::{ApiClient, TransportError};

pub const PERMISSIONS_PATH: &str = "/api/permissions";

#[derive(Debug, Default)]
struct RbacState {
    permissions: PermissionSet,
    error: Option<String>,
    /// Bumped on every invalidation or replacement so a fetch that started
    /// before a logout or a user switch cannot repopulate the set afterwards.
    generation: u64,
}

/// Process-wide permission container.
///
/// Only meaningful while the session is authenticated; the auth store
/// populates it after the user fetch and clears it on logout.
#[derive(Debug)]
pub struct RbacStore {
    api: ApiClient,
    state: RwLock<RbacState>,
}

impl RbacStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(RbacState::default()),
        }
    }

    pub fn has_permission(&self, name: &str) -> bool {
        self.read().permissions.allows(name)
    }

    pub fn permissions(&self) -> PermissionSet {
        self.read().permissions.clone()
    }

    /// Whether any permission is known; guards poll on this.
    pub fn is_populated(&self) -> bool {
        !self.read().permissions.is_empty()
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn replace(&self, permissions: PermissionSet) {
        let mut state = self.write();
        tracing::debug!(count = permissions.len(), "permission set replaced");
        state.permissions = permissions;
        state.error = None;
        // A fetch still running for the previous session must not overwrite this.
        state.generation += 1;
    }

    /// Drop every permission (logout, failed session fetch).
    pub fn invalidate(&self) {
        let mut state = self.write();
        state.permissions = PermissionSet::new();
        state.error = None;
        state.generation += 1;
    }

    /// Load `GET /api/permissions` into the store.
    ///
    /// Returns whether the set was updated. Failures land in the error slot.
    pub async fn fetch_permissions(&self) -> bool {
        let generation = self.read().generation;

        let result = match self.api.get(PERMISSIONS_PATH).await {
            Ok(env) if env.success => env.decode::<Vec<Value>>().map(parse_permissions),
            Ok(env) => Err(TransportError::Decode(env.message_or("permission request was rejected"))),
            Err(e) => Err(e),
        };

        let mut state = self.write();
        if state.generation != generation {
            tracing::debug!("discarding permissions fetched for an invalidated session");
            return false;
        }

        match result {
            Ok(permissions) => {
                tracing::debug!(count = permissions.len(), "permissions loaded");
                state.permissions = permissions;
                state.error = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load permissions");
                state.error = Some(e.user_message());
                false
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RbacState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RbacState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Accepts `["vendors.read"]` and `[{ "name": "vendors.read" }]`.
fn parse_permissions(items: Vec<Value>) -> PermissionSet {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name),
            Value::Object(mut obj) => match obj.remove("name") {
                Some(Value::String(name)) => Some(name),
                _ => None,
            },
            _ => None,
        })
        .filter(|name| !name.trim().is_empty())
        .map(Permission::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use atlas_client::testing::{Scripted, ScriptedTransport};
    use atlas_client::{ApiEnvelope, Method};
    use serde_json::json;

    fn store(transport: &Arc<ScriptedTransport>) -> RbacStore {
        RbacStore::new(ApiClient::new(transport.clone()))
    }

    #[tokio::test]
    async fn loads_string_and_object_permissions() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(
            Method::Get,
            PERMISSIONS_PATH,
            ApiEnvelope::ok(json!(["vendors.read", { "name": "budgets.read", "guard_name": "web" }, 7])),
        );
        let rbac = store(&transport);

        assert!(rbac.fetch_permissions().await);
        assert!(rbac.has_permission("vendors.read"));
        assert!(rbac.has_permission("budgets.read"));
        assert_eq!(rbac.permissions().len(), 2);
    }

    #[tokio::test]
    async fn failure_keeps_set_empty_and_records_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(Method::Get, PERMISSIONS_PATH, Scripted::Unavailable("refused".into()));
        let rbac = store(&transport);

        assert!(!rbac.fetch_permissions().await);
        assert!(!rbac.is_populated());
        assert!(rbac.error().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_discards_in_flight_fetch() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_after(
            Method::Get,
            PERMISSIONS_PATH,
            std::time::Duration::from_millis(200),
            ApiEnvelope::ok(json!(["vendors.read"])),
        );
        let rbac = Arc::new(store(&transport));

        let fetch = {
            let rbac = rbac.clone();
            tokio::spawn(async move { rbac.fetch_permissions().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        rbac.invalidate();

        assert!(!fetch.await.unwrap());
        assert!(!rbac.is_populated());
    }

    #[tokio::test(start_paused = true)]
    async fn replace_wins_over_in_flight_fetch() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_after(
            Method::Get,
            PERMISSIONS_PATH,
            std::time::Duration::from_millis(200),
            ApiEnvelope::ok(json!(["*"])),
        );
        let rbac = Arc::new(store(&transport));

        let fetch = {
            let rbac = rbac.clone();
            tokio::spawn(async move { rbac.fetch_permissions().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        rbac.replace([Permission::new("vendors.read")].into_iter().collect());

        assert!(!fetch.await.unwrap());
        assert!(rbac.has_permission("vendors.read"));
        assert!(!rbac.has_permission("rbac.manage"));
    }
}

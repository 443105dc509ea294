//! Wiring of the process-wide session containers.

use std::sync::Arc;

use atlas_client::{ApiClient, ClientConfig, Notifier, Transport};

use crate::auth_store::AuthStore;
use crate::config::GuardConfig;
use crate::guard::Guards;
use crate::rbac_store::RbacStore;
use crate::router::Router;
use crate::routes::RouteTable;

/// Shared session state handed to every page and store.
#[derive(Clone)]
pub struct SessionContext {
    pub api: ApiClient,
    pub auth: Arc<AuthStore>,
    pub rbac: Arc<RbacStore>,
    pub notifier: Arc<dyn Notifier>,
    pub guard_config: GuardConfig,
}

impl SessionContext {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>, guard_config: GuardConfig) -> Self {
        let api = ApiClient::new(transport);
        let rbac = Arc::new(RbacStore::new(api.clone()));
        let auth = Arc::new(AuthStore::new(api.clone(), rbac.clone()));

        Self {
            api,
            auth,
            rbac,
            notifier,
            guard_config,
        }
    }

    pub fn from_client_config(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::new(transport, notifier, GuardConfig::from_client(config))
    }

    pub fn guards(&self) -> Guards {
        Guards::new(
            self.auth.clone(),
            self.rbac.clone(),
            self.notifier.clone(),
            self.guard_config.clone(),
        )
    }

    pub fn router(&self, table: RouteTable) -> Router {
        Router::new(table, self.guards())
    }
}

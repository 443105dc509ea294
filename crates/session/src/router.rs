//! Resolve a navigation against the route table and run its guard.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::guard::{GuardOutcome, Guards, Navigation, Redirect};
use crate::routes::{Access, RouteTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Render {
        route: &'static str,
        params: BTreeMap<String, String>,
    },
    Redirect(Redirect),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    guards: Guards,
}

impl Router {
    pub fn new(table: RouteTable, guards: Guards) -> Self {
        Self { table, guards }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub async fn navigate(&self, navigation: &Navigation) -> NavigationOutcome {
        let Some((route, params)) = self.table.resolve(&navigation.path) else {
            tracing::debug!(path = %navigation.path, "no route matched");
            return NavigationOutcome::NotFound;
        };

        let outcome = match &route.access {
            Access::Public => GuardOutcome::Proceed,
            Access::GuestOnly => self.guards.redirect_if_authenticated().await,
            Access::Authenticated => self.guards.require_auth().await,
            Access::Permission(permission) => self.guards.require_permission(permission, navigation).await,
        };

        match outcome {
            GuardOutcome::Proceed => NavigationOutcome::Render {
                route: route.name,
                params,
            },
            GuardOutcome::Redirect(redirect) => NavigationOutcome::Redirect(redirect),
        }
    }
}

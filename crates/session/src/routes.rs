//! ERP route surface and the access rule attached to each page.

use std::collections::BTreeMap;

use atlas_auth::Permission;

use crate::config::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Only visitors without a session (login, registration).
    GuestOnly,
    Authenticated,
    Permission(Permission),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    /// Path pattern; `:name` segments capture parameters.
    pub pattern: &'static str,
    pub access: Access,
}

impl Route {
    pub const fn new(name: &'static str, pattern: &'static str, access: Access) -> Self {
        Self { name, pattern, access }
    }

    /// Match a concrete path (query and fragment ignored) and return the
    /// captured parameters.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = normalize_path(path);
        let pattern = normalize_path(self.pattern);

        let mut actual = path.split('/');
        let mut expected = pattern.split('/');
        let mut params = BTreeMap::new();

        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return Some(params),
                (Some(want), Some(got)) => {
                    if let Some(name) = want.strip_prefix(':') {
                        if got.is_empty() {
                            return None;
                        }
                        params.insert(name.to_string(), got.to_string());
                    } else if want != got {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }
}

/// Ordered route list; the first matching route wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Option<(&Route, BTreeMap<String, String>)> {
        self.routes
            .iter()
            .find_map(|route| route.matches(path).map(|params| (route, params)))
    }

    /// Pages of the ERP application.
    pub fn erp() -> Self {
        let perm = |name: &'static str| Access::Permission(Permission::from_static(name));

        Self::new()
            .with(Route::new("login", "/login", Access::GuestOnly))
            .with(Route::new("register", "/register", Access::GuestOnly))
            .with(Route::new("forgot-password", "/forgot-password", Access::GuestOnly))
            .with(Route::new("reset-password", "/reset-password", Access::GuestOnly))
            .with(Route::new("reset-password-token", "/reset-password/:token", Access::GuestOnly))
            .with(Route::new("home", "/", Access::Authenticated))
            .with(Route::new("dashboard", "/dashboard", Access::Authenticated))
            .with(Route::new("profile", "/profile", Access::Authenticated))
            .with(Route::new("employees", "/employees", perm("employees.read")))
            .with(Route::new("employee", "/employees/:id", perm("employees.read")))
            .with(Route::new("departments", "/departments", perm("departments.read")))
            .with(Route::new("positions", "/positions", perm("positions.read")))
            .with(Route::new("holidays", "/holidays", perm("holidays.read")))
            .with(Route::new("leaves", "/leaves", perm("leaves.read")))
            .with(Route::new("payroll", "/payroll", perm("payroll.read")))
            .with(Route::new("budgets", "/budgets", perm("budgets.read")))
            .with(Route::new("vendors", "/vendors", perm("vendors.read")))
            .with(Route::new("vendor", "/vendors/:id", perm("vendors.read")))
            .with(Route::new("purchase-orders", "/purchase-orders", perm("purchase_orders.read")))
            .with(Route::new("purchase-order", "/purchase-orders/:id", perm("purchase_orders.read")))
            .with(Route::new("inventory", "/inventory", perm("inventory.read")))
            .with(Route::new("roles", "/roles", perm("rbac.manage")))
            .with(Route::new("users", "/users", perm("rbac.manage")))
    }
}

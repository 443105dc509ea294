//! Guard timings and the fixed redirect routes.

use std::time::Duration;

use url::Url;

use atlas_client::ClientConfig;

/// How guards wait for session state and where they send users.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardConfig {
    /// Origin the application is served from.
    pub app_origin: Url,

    pub login_route: String,

    /// Default landing route for authenticated users.
    pub landing_route: String,

    /// Public authentication pages; never used as a fallback target.
    pub auth_routes: Vec<String>,

    /// Poll interval while a session fetch is in flight.
    pub session_poll_interval: Duration,

    /// Upper bound on waiting for a session fetch; `None` waits forever.
    pub session_timeout: Option<Duration>,

    /// Permission poll budget: attempts × interval (≈1 s by default).
    pub permission_poll_attempts: u32,
    pub permission_poll_interval: Duration,
}

impl GuardConfig {
    pub fn for_origin(app_origin: Url) -> Self {
        Self {
            app_origin,
            login_route: "/login".to_string(),
            landing_route: "/dashboard".to_string(),
            auth_routes: ["/login", "/register", "/forgot-password", "/reset-password"]
                .into_iter()
                .map(String::from)
                .collect(),
            session_poll_interval: Duration::from_millis(50),
            session_timeout: Some(Duration::from_secs(15)),
            permission_poll_attempts: 10,
            permission_poll_interval: Duration::from_millis(100),
        }
    }

    pub fn from_client(config: &ClientConfig) -> Self {
        Self::for_origin(config.app_origin.clone())
    }

    /// `/reset-password/abc123` counts as the `/reset-password` page.
    pub fn is_auth_path(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.auth_routes.iter().any(|route| {
            let route = normalize_path(route);
            path == route || path.strip_prefix(route).is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Strip a trailing slash (except for the root) so `/vendors/` equals `/vendors`.
pub(crate) fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_paths_include_sub_paths() {
        let cfg = GuardConfig::for_origin(Url::parse("https://erp.example.com").unwrap());
        assert!(cfg.is_auth_path("/login"));
        assert!(cfg.is_auth_path("/login/"));
        assert!(cfg.is_auth_path("/reset-password/token-123"));
        assert!(!cfg.is_auth_path("/login-history"));
        assert!(!cfg.is_auth_path("/vendors"));
    }

    #[test]
    fn permission_budget_is_about_one_second() {
        let cfg = GuardConfig::for_origin(Url::parse("https://erp.example.com").unwrap());
        assert_eq!(cfg.permission_poll_interval * cfg.permission_poll_attempts, Duration::from_secs(1));
    }
}

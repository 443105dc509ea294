//! Where to send a user who was denied a page.

use url::Url;

use crate::config::{GuardConfig, normalize_path};

/// Pick the redirect target after a permission denial.
///
/// The referring page wins when it is same-origin, is not the denied page and
/// is not an authentication page; otherwise the landing route. Relative
/// referrers are resolved against the application origin.
pub fn fallback_target(referrer: Option<&str>, denied_path: &str, config: &GuardConfig) -> String {
    referrer
        .and_then(|raw| usable_referrer(raw, denied_path, config))
        .unwrap_or_else(|| config.landing_route.clone())
}

fn usable_referrer(raw: &str, denied_path: &str, config: &GuardConfig) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let url: Url = config.app_origin.join(raw).ok()?;
    if url.origin() != config.app_origin.origin() {
        return None;
    }

    let path = normalize_path(url.path());
    let denied = normalize_path(denied_path.split(['?', '#']).next().unwrap_or(denied_path));
    if path == denied || config.is_auth_path(path) {
        return None;
    }

    Some(match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    })
}

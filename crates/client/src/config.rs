//! Client configuration (environment driven).

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL in {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where the API lives and how to talk to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL requests are issued against (`/api/...` is appended).
    pub api_base_url: String,

    /// Origin the application is served from; referrers from other origins
    /// are never used as redirect targets.
    pub app_origin: Url,

    /// Optional bearer token (otherwise the session cookie is used).
    pub auth_token: Option<String>,

    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Read `ATLAS_API_URL`, `ATLAS_APP_ORIGIN`, `ATLAS_AUTH_TOKEN` and
    /// `ATLAS_REQUEST_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("ATLAS_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_url("ATLAS_API_URL", &api_base_url)?;

        // The SPA is usually served by the same host as the API.
        let app_origin = match lookup("ATLAS_APP_ORIGIN").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_url("ATLAS_APP_ORIGIN", &raw)?,
            None => api_url.clone(),
        };

        let request_timeout = match lookup("ATLAS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "ATLAS_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            app_origin,
            auth_token: lookup("ATLAS_AUTH_TOKEN").filter(|v| !v.is_empty()),
            request_timeout,
        })
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.api_base_url, "http://localhost:8000");
        assert_eq!(cfg.app_origin.origin(), Url::parse("http://localhost:8000").unwrap().origin());
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert!(cfg.auth_token.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("ATLAS_API_URL", "https://erp.example.com/"),
            ("ATLAS_APP_ORIGIN", "https://app.example.com"),
            ("ATLAS_AUTH_TOKEN", "secret"),
            ("ATLAS_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(cfg.api_base_url, "https://erp.example.com");
        assert_eq!(cfg.app_origin.host_str(), Some("app.example.com"));
        assert_eq!(cfg.auth_token.as_deref(), Some("secret"));
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("ATLAS_API_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: "ATLAS_API_URL", .. }));

        let err = ClientConfig::from_lookup(lookup(&[("ATLAS_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "ATLAS_REQUEST_TIMEOUT_SECS",
                value: "soon".to_string()
            }
        );
    }
}

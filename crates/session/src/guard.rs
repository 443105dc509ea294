//! Route guards.
//!
//! Each guard resolves a navigation to [`GuardOutcome::Proceed`] or a
//! [`Redirect`]; none of them can fail.

use std::sync::Arc;

use serde::Serialize;
use tokio::time::{Instant, sleep};

use atlas_auth::{AuthzError, Permission, SessionUser, authorize};
use atlas_client::{Notification, Notifier};

use crate::auth_store::AuthStore;
use crate::config::GuardConfig;
use crate::fallback::fallback_target;
use crate::rbac_store::RbacStore;

/// One navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Target path, optionally with a query string.
    pub path: String,
    /// Referring URL (absolute or app-relative), if any.
    pub referrer: Option<String>,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            referrer: None,
        }
    }

    pub fn from(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "permission", rename_all = "snake_case")]
pub enum RedirectReason {
    Unauthenticated,
    Forbidden(Permission),
    AlreadyAuthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    pub reason: RedirectReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    Proceed,
    Redirect(Redirect),
}

impl GuardOutcome {
    pub fn is_proceed(&self) -> bool {
        matches!(self, GuardOutcome::Proceed)
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            GuardOutcome::Proceed => None,
            GuardOutcome::Redirect(r) => Some(r),
        }
    }
}

/// Guard functions over the shared session containers.
#[derive(Clone)]
pub struct Guards {
    auth: Arc<AuthStore>,
    rbac: Arc<RbacStore>,
    notifier: Arc<dyn Notifier>,
    config: GuardConfig,
}

impl core::fmt::Debug for Guards {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Guards").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Guards {
    pub fn new(
        auth: Arc<AuthStore>,
        rbac: Arc<RbacStore>,
        notifier: Arc<dyn Notifier>,
        config: GuardConfig,
    ) -> Self {
        Self {
            auth,
            rbac,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Proceed only with a valid session; otherwise redirect to login.
    pub async fn require_auth(&self) -> GuardOutcome {
        match self.resolve_session().await {
            Some(_) => GuardOutcome::Proceed,
            None => self.login_redirect(),
        }
    }

    /// Proceed only if the session holds `permission`.
    ///
    /// Authentication is checked first. The permission set is then polled for
    /// about a second; if it is still empty the check fails closed.
    pub async fn require_permission(&self, permission: &Permission, navigation: &Navigation) -> GuardOutcome {
        if let GuardOutcome::Redirect(redirect) = self.require_auth().await {
            return GuardOutcome::Redirect(redirect);
        }

        let mut attempts = 0;
        while !self.rbac.is_populated() && attempts < self.config.permission_poll_attempts {
            sleep(self.config.permission_poll_interval).await;
            attempts += 1;
        }

        match authorize(&self.rbac.permissions(), permission) {
            Ok(()) => GuardOutcome::Proceed,
            Err(err) => self.denied(permission, navigation, &err),
        }
    }

    /// Keep signed-in users away from guest-only pages such as the login form.
    pub async fn redirect_if_authenticated(&self) -> GuardOutcome {
        match self.resolve_session().await {
            Some(_) => GuardOutcome::Redirect(Redirect {
                to: self.config.landing_route.clone(),
                replace: true,
                reason: RedirectReason::AlreadyAuthenticated,
            }),
            None => GuardOutcome::Proceed,
        }
    }

    /// Cached user, or the result of the (single) in-flight fetch.
    async fn resolve_session(&self) -> Option<SessionUser> {
        if let Some(user) = self.auth.user() {
            return Some(user);
        }

        self.auth.trigger_fetch();

        let started = Instant::now();
        while self.auth.is_loading() {
            if let Some(limit) = self.config.session_timeout {
                if started.elapsed() >= limit {
                    tracing::warn!(waited_ms = limit.as_millis() as u64, "session fetch did not resolve in time");
                    return None;
                }
            }
            sleep(self.config.session_poll_interval).await;
        }

        self.auth.user()
    }

    fn login_redirect(&self) -> GuardOutcome {
        GuardOutcome::Redirect(Redirect {
            to: self.config.login_route.clone(),
            replace: false,
            reason: RedirectReason::Unauthenticated,
        })
    }

    fn denied(&self, permission: &Permission, navigation: &Navigation, err: &AuthzError) -> GuardOutcome {
        let target = fallback_target(navigation.referrer.as_deref(), &navigation.path, &self.config);
        tracing::warn!(
            permission = %permission,
            path = %navigation.path,
            redirect = %target,
            reason = %err,
            "navigation denied"
        );

        self.notifier.notify(Notification::warning(format!(
            "You do not have permission to {}.",
            permission.describe()
        )));

        GuardOutcome::Redirect(Redirect {
            to: target,
            replace: true,
            reason: RedirectReason::Forbidden(permission.clone()),
        })
    }
}

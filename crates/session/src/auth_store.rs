//! Current user / session container.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use atlas_auth::SessionUser;
use atlas_client::{ApiClient, TransportError};
use atlas_core::FieldErrors;

use crate::rbac_store::RbacStore;

pub const USER_PATH: &str = "/api/user";
pub const LOGIN_PATH: &str = "/api/login";
pub const LOGOUT_PATH: &str = "/api/logout";

#[derive(Debug, Clone, Default)]
struct AuthState {
    user: Option<SessionUser>,
    loading: bool,
    error: Option<String>,
    /// Bumped whenever the session changes hands (sign-in, logout, cleared
    /// session) so a user fetch started earlier cannot write its result back.
    generation: u64,
}

/// Login form payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated(SessionUser),
    /// The backend refused the credentials; field errors are camelCase keyed.
    Rejected { message: String, errors: FieldErrors },
    /// Network or unexpected failure, reduced to a message.
    Failed(String),
}

/// Process-wide session container.
///
/// `loading` is true while a user fetch is in flight; guards poll on it.
#[derive(Debug)]
pub struct AuthStore {
    api: ApiClient,
    rbac: Arc<RbacStore>,
    state: RwLock<AuthState>,
}

impl AuthStore {
    pub fn new(api: ApiClient, rbac: Arc<RbacStore>) -> Self {
        Self {
            api,
            rbac,
            state: RwLock::new(AuthState::default()),
        }
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn rbac(&self) -> &Arc<RbacStore> {
        &self.rbac
    }

    /// Fetch the session user and wait for the answer.
    pub async fn fetch_user(&self) -> Option<SessionUser> {
        self.write().loading = true;
        self.run_fetch().await
    }

    /// Start a background fetch unless a user is cached or a fetch is already
    /// in flight. Returns whether this call started one.
    ///
    /// The check and the `loading` flag are set under one lock, so concurrent
    /// first navigations share a single request.
    pub fn trigger_fetch(self: &Arc<Self>) -> bool {
        {
            let mut state = self.write();
            if state.user.is_some() || state.loading {
                return false;
            }
            state.loading = true;
        }

        let store = Arc::clone(self);
        tokio::spawn(async move {
            store.run_fetch().await;
        });
        true
    }

    /// `POST /api/login`; on success the session user and permissions are
    /// loaded exactly as after a session restore.
    pub async fn login(&self, credentials: &Credentials) -> LoginOutcome {
        let body = match serde_json::to_value(credentials) {
            Ok(body) => body,
            Err(e) => return LoginOutcome::Failed(e.to_string()),
        };

        match self.api.post(LOGIN_PATH, body).await {
            Ok(env) if env.success => match env.decode::<SessionUser>() {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, roles = ?user.role_names(), "signed in");
                    self.set_user(user.clone(), None);
                    LoginOutcome::Authenticated(user)
                }
                // Cookie-only backends answer without a body; ask for the user.
                Err(_) => match self.fetch_user().await {
                    Some(user) => LoginOutcome::Authenticated(user),
                    None => LoginOutcome::Failed(
                        self.error()
                            .unwrap_or_else(|| "Signed in, but the session could not be loaded.".to_string()),
                    ),
                },
            },
            Ok(env) => {
                let mut errors = FieldErrors::new();
                if let Some(server) = &env.errors {
                    errors.merge_server(server);
                }
                LoginOutcome::Rejected {
                    message: env.message_or("These credentials do not match our records."),
                    errors,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                let message = e.user_message();
                self.write().error = Some(message.clone());
                LoginOutcome::Failed(message)
            }
        }
    }

    /// `POST /api/logout`. Local session state is cleared whatever the
    /// backend answers; returns whether the backend confirmed.
    pub async fn logout(&self) -> bool {
        let confirmed = match self.api.post_empty(LOGOUT_PATH).await {
            Ok(env) => env.success,
            Err(e) if e.is_unauthenticated() => true,
            Err(e) => {
                tracing::warn!(error = %e, "logout request failed");
                false
            }
        };

        {
            let mut state = self.write();
            state.user = None;
            state.loading = false;
            state.error = None;
            state.generation += 1;
        }
        self.rbac.invalidate();
        tracing::info!(confirmed, "signed out");

        confirmed
    }

    async fn run_fetch(&self) -> Option<SessionUser> {
        let generation = self.read().generation;

        let result = match self.api.get(USER_PATH).await {
            Ok(env) if env.success => env.decode::<SessionUser>().map(Some),
            // `{ success: false }` on the user endpoint means "no session".
            Ok(_) => Ok(None),
            Err(TransportError::Unauthenticated) => Ok(None),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(user)) => {
                if !self.set_user(user.clone(), Some(generation)) {
                    tracing::debug!(user_id = %user.id, "discarding user fetched for a replaced session");
                    return self.user();
                }
                tracing::debug!(user_id = %user.id, "session restored");
                Some(user)
            }
            Ok(None) => {
                self.clear_session(None, generation);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch session user");
                self.clear_session(Some(e.user_message()), generation);
                None
            }
        }
    }

    /// Install `user` as the session. When `fetched_at` is given, the write
    /// only happens if the session has not changed since that generation.
    ///
    /// The permission set is always replaced: embedded permissions seed it,
    /// otherwise it is emptied until the fresh fetch lands.
    fn set_user(&self, user: SessionUser, fetched_at: Option<u64>) -> bool {
        let embedded = user.embedded_permissions();
        {
            let mut state = self.write();
            if fetched_at.is_some_and(|g| g != state.generation) {
                return false;
            }
            state.user = Some(user);
            state.loading = false;
            state.error = None;
            state.generation += 1;
        }

        match embedded {
            Some(permissions) => self.rbac.replace(permissions),
            None => {
                self.rbac.invalidate();
                let rbac = Arc::clone(&self.rbac);
                tokio::spawn(async move {
                    rbac.fetch_permissions().await;
                });
            }
        }
        true
    }

    fn clear_session(&self, error: Option<String>, fetched_at: u64) {
        {
            let mut state = self.write();
            if state.generation != fetched_at {
                tracing::debug!("discarding session result for a replaced session");
                return;
            }
            state.user = None;
            state.loading = false;
            state.error = error;
            state.generation += 1;
        }
        self.rbac.invalidate();
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

//! `atlas-session`
//!
//! **Responsibility:** who is signed in, what they may do, and whether a
//! navigation may proceed.
//!
//! This crate provides:
//! - `AuthStore` and `RbacStore`, the process-wide session containers
//! - The route guards (`require_auth`, `require_permission`,
//!   `redirect_if_authenticated`)
//! - The ERP route table and a router that runs the matching guard
//!
//! Guards never fail: every navigation resolves to proceed or redirect.

pub mod auth_store;
pub mod config;
pub mod context;
pub mod fallback;
pub mod guard;
pub mod rbac_store;
pub mod router;
pub mod routes;

pub use auth_store::{AuthStore, Credentials, LoginOutcome};
pub use config::GuardConfig;
pub use context::SessionContext;
pub use fallback::fallback_target;
pub use guard::{GuardOutcome, Guards, Navigation, Redirect, RedirectReason};
pub use rbac_store::RbacStore;
pub use router::{NavigationOutcome, Router};
pub use routes::{Access, Route, RouteTable};

//! `atlas-client`
//!
//! **Responsibility:** REST plumbing shared by the session and entity stores.
//!
//! This crate provides:
//! - The response envelope every endpoint returns
//! - A `Transport` seam with a `reqwest` implementation
//! - `ApiClient`, typed helpers over a transport
//! - Client configuration and the toast notification sink
//!
//! The client is a **thin shell** around the ERP REST API; the API remains
//! the authority for every record.

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod notify;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use envelope::ApiEnvelope;
pub use error::TransportError;
pub use http::HttpTransport;
pub use notify::{Notification, NotificationLevel, Notifier, ToastQueue, TracingNotifier};
pub use transport::{ApiRequest, Method, Transport};

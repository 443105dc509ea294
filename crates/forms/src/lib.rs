//! `atlas-forms`
//!
//! **Responsibility:** the per-entity state containers behind every ERP
//! dialog: form data, field errors, the record list and CRUD over REST.
//!
//! One generic [`EntityStore`] is parameterized by a [`Resource`]; the
//! `entities` module declares the resources (fields, rules, endpoint).
//!
//! Client field names are camelCase; the backend speaks snake_case. The
//! translation happens in `wire`, never in the entity modules.

pub mod entities;
pub mod error;
pub mod form;
pub mod resource;
pub mod rules;
pub mod schema;
pub mod serde_amount;
pub mod store;
pub mod wire;

pub use error::FormError;
pub use form::{FormData, FormState};
pub use resource::Resource;
pub use rules::Rule;
pub use schema::{FieldKind, FieldSpec, FormSchema};
pub use store::{EntityStore, SubmitOutcome};

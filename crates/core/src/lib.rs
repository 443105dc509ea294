//! `atlas-core`: building blocks shared by every client crate.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no runtime).

pub mod casing;
pub mod entity;
pub mod error;
pub mod field_errors;
pub mod id;

pub use casing::{to_camel_case, to_snake_case};
pub use entity::Entity;
pub use error::{CoreError, CoreResult};
pub use field_errors::FieldErrors;
pub use id::{RecordId, UserId};

use serde::Serialize;
use serde::de::DeserializeOwned;

use atlas_core::Entity;

use crate::schema::FormSchema;

/// A REST collection with a dialog form.
///
/// Implemented by a marker type per entity; [`crate::EntityStore`] supplies
/// the state and CRUD behaviour.
pub trait Resource: Send + Sync + 'static {
    /// Record as the backend returns it (snake_case fields).
    type Record: DeserializeOwned + Serialize + Entity + Clone + core::fmt::Debug + Send + Sync;

    /// Collection path, e.g. `/api/vendors`.
    const ENDPOINT: &'static str;

    /// Singular label used in notifications ("Vendor").
    const LABEL: &'static str;

    fn schema() -> FormSchema;
}

//! Entity trait: identity + continuity across state changes.

use crate::id::RecordId;

/// A record the backend persists and addresses by id.
///
/// Per-entity stores use the id to target update/delete endpoints and to
/// track which record a form is editing.
pub trait Entity {
    /// Backend identifier of this record.
    fn id(&self) -> RecordId;
}

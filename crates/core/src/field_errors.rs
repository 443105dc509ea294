//! Per-field validation messages keyed by client (camelCase) field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::casing::to_camel_case;

/// Error record kept parallel to a form's data.
///
/// At most one message per field: the UI renders the first failure inline
/// beside the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn clear(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge server-side validation errors (`{ "vendor_name": ["..."] }`).
    ///
    /// Keys are translated to camelCase and only the first message per field
    /// is kept. Fields with an empty message list are ignored.
    pub fn merge_server(&mut self, server: &BTreeMap<String, Vec<String>>) {
        for (wire_field, messages) in server {
            if let Some(first) = messages.first() {
                self.set(to_camel_case(wire_field), first.clone());
            }
        }
    }
}

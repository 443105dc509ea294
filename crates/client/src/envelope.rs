//! The JSON envelope every ERP endpoint answers with.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;

/// `{ success, data?, message?, errors? }`
///
/// `errors` carries server-side validation failures keyed by wire (snake_case)
/// field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn validation_failure(
        message: impl Into<String>,
        errors: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors: Some(errors),
            ..Self::default()
        }
    }

    pub fn has_field_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Decode `data` into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        let data = self
            .data
            .clone()
            .ok_or_else(|| TransportError::Decode("response carried no data".to_string()))?;
        serde_json::from_value(data).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Decode a list, accepting both a bare array and a paginated object
    /// (`{ "data": [...], "current_page": 1, ... }`).
    pub fn decode_list<T: DeserializeOwned>(&self) -> Result<Vec<T>, TransportError> {
        let items = match &self.data {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Object(page)) => page.get("data").cloned().ok_or_else(|| {
                TransportError::Decode("paginated response without a data array".to_string())
            })?,
            Some(other) => other.clone(),
        };
        serde_json::from_value(items).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Message suitable for a toast, falling back to `default`.
    pub fn message_or(&self, default: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

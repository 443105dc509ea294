//! Translation between form data (camelCase strings) and wire JSON
//! (snake_case, typed values).

use serde_json::{Map, Number, Value};

use atlas_core::to_snake_case;

use crate::form::FormData;
use crate::schema::{FieldKind, FormSchema};

pub fn to_wire(schema: &FormSchema, data: &FormData) -> Value {
    let mut body = Map::new();
    for spec in schema.fields() {
        let raw = data.get(spec.name).map(|v| v.trim()).unwrap_or("");
        body.insert(to_snake_case(spec.name), encode(spec.kind, raw));
    }
    Value::Object(body)
}

/// Values for the schema's fields found in `record`. Missing keys are
/// skipped so the caller's defaults stay in place.
pub fn from_wire(schema: &FormSchema, record: &Value) -> FormData {
    let mut data = FormData::new();
    for spec in schema.fields() {
        let Some(value) = record.get(to_snake_case(spec.name)) else {
            continue;
        };
        if let Some(text) = decode(spec.kind, value) {
            data.insert(spec.name.to_string(), text);
        }
    }
    data
}

fn encode(kind: FieldKind, raw: &str) -> Value {
    if raw.is_empty() {
        return match kind {
            FieldKind::Boolean => Value::Bool(false),
            _ => Value::Null,
        };
    }

    match kind {
        FieldKind::Text | FieldKind::Date => Value::String(raw.to_string()),
        FieldKind::Boolean => Value::Bool(matches!(raw, "true" | "1" | "on")),
        FieldKind::Integer | FieldKind::Number => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
                Value::Number(n)
            } else {
                // Let the backend report the bad value.
                Value::String(raw.to_string())
            }
        }
    }
}

fn decode(kind: FieldKind, value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // `2025-01-31T00:00:00.000000Z` from timestamp columns.
        Value::String(s) if kind == FieldKind::Date => Some(s.get(..10).unwrap_or(s.as_str()).to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

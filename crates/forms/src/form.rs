//! Form state shared by every entity dialog.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use atlas_core::{FieldErrors, RecordId};

use crate::error::FormError;
use crate::schema::FormSchema;
use crate::wire;

/// Field values keyed by client (camelCase) name, as typed by the user.
pub type FormData = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FormState {
    schema: Arc<FormSchema>,
    data: FormData,
    errors: FieldErrors,
    open: bool,
    editing: Option<RecordId>,
    saving: bool,
}

impl FormState {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let data = schema.initial_data();
        Self {
            schema,
            data,
            errors: FieldErrors::new(),
            open: false,
            editing: None,
            saving: false,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.data.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Record being edited; `None` while creating.
    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Set one field.
    ///
    /// Only a field that already shows an error is re-checked, so the message
    /// disappears as soon as the value becomes valid without flagging fields
    /// the user has not reached yet.
    pub fn update_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        let schema = Arc::clone(&self.schema);
        let spec = schema
            .get(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        self.data.insert(spec.name.to_string(), value.into());

        if self.errors.contains(spec.name) {
            match schema.check_field(spec, &self.data) {
                Some(message) => self.errors.set(spec.name, message),
                None => {
                    self.errors.clear(spec.name);
                }
            }
        }
        Ok(())
    }

    /// Run every rule; returns whether the form is valid.
    pub fn validate_form(&mut self) -> bool {
        self.errors.clear_all();
        for spec in self.schema.fields() {
            if let Some(message) = self.schema.check_field(spec, &self.data) {
                self.errors.set(spec.name, message);
            }
        }
        self.errors.is_empty()
    }

    /// Back to the declared initial values with no errors.
    pub fn reset_form(&mut self) {
        self.data = self.schema.initial_data();
        self.errors.clear_all();
        self.editing = None;
        self.saving = false;
    }

    pub fn open_create(&mut self) {
        self.reset_form();
        self.open = true;
    }

    /// Load a record (wire JSON, snake_case keys) into the form.
    pub fn open_edit(&mut self, id: RecordId, record: &Value) -> Result<(), FormError> {
        if !record.is_object() {
            return Err(FormError::InvalidRecord(format!("record {id} is not an object")));
        }
        self.reset_form();
        self.data.extend(wire::from_wire(&self.schema, record));
        self.editing = Some(id);
        self.open = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
        self.reset_form();
    }

    /// Payload for create/update requests.
    pub fn to_wire(&self) -> Value {
        wire::to_wire(&self.schema, &self.data)
    }

    pub(crate) fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub(crate) fn merge_server_errors(&mut self, errors: &BTreeMap<String, Vec<String>>) {
        self.errors.merge_server(errors);
    }
}

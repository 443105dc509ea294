//! Generic per-entity store: list, form and CRUD.
//!
//! Failures never escape as errors. Every call resolves to state (the error
//! slot, field errors) plus a [`SubmitOutcome`] for the caller to branch on.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use atlas_client::{ApiClient, ApiEnvelope, ApiRequest, Method, Notification, Notifier, TransportError};
use atlas_core::{Entity, RecordId};

use crate::error::FormError;
use crate::form::FormState;
use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// The backend answered `success: false` (validation or business rule).
    Rejected(String),
    /// Network or unexpected failure.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved)
    }
}

pub struct EntityStore<R: Resource> {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    form: FormState,
    items: Vec<R::Record>,
    loading: bool,
    error: Option<String>,
    _resource: PhantomData<R>,
}

impl<R: Resource> core::fmt::Debug for EntityStore<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityStore")
            .field("endpoint", &R::ENDPOINT)
            .field("form", &self.form)
            .field("items", &self.items.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> EntityStore<R> {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            form: FormState::new(Arc::new(R::schema())),
            items: Vec::new(),
            loading: false,
            error: None,
            _resource: PhantomData,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    pub fn find(&self, id: RecordId) -> Option<&R::Record> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.update_field(field, value)
    }

    pub fn validate_form(&mut self) -> bool {
        self.form.validate_form()
    }

    pub fn reset_form(&mut self) {
        self.form.reset_form();
    }

    pub fn open_create(&mut self) {
        self.error = None;
        self.form.open_create();
    }

    pub fn open_edit(&mut self, record: &R::Record) -> Result<(), FormError> {
        let value = serde_json::to_value(record).map_err(|e| FormError::InvalidRecord(e.to_string()))?;
        self.error = None;
        self.form.open_edit(record.id(), &value)
    }

    pub fn close(&mut self) {
        self.form.close();
    }

    /// `GET` the collection into `items`. Returns whether it succeeded.
    pub async fn fetch_all(&mut self) -> bool {
        self.loading = true;
        let result = match self.api.get(R::ENDPOINT).await {
            Ok(env) if env.success => env.decode_list::<R::Record>().map_err(|e| e.user_message()),
            Ok(env) => Err(env.message_or("The list could not be loaded.")),
            Err(e) => Err(e.user_message()),
        };
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::debug!(endpoint = R::ENDPOINT, count = items.len(), "list loaded");
                self.items = items;
                self.error = None;
                true
            }
            Err(message) => {
                tracing::warn!(endpoint = R::ENDPOINT, error = %message, "failed to load list");
                self.fail(message);
                false
            }
        }
    }

    pub async fn create(&mut self) -> SubmitOutcome {
        if !self.form.validate_form() {
            return SubmitOutcome::Invalid;
        }
        self.submit(Method::Post, R::ENDPOINT.to_string(), "created").await
    }

    /// `PUT` the form to the record being edited.
    pub async fn update(&mut self) -> SubmitOutcome {
        let Some(id) = self.form.editing() else {
            return SubmitOutcome::Failed("No record is being edited.".to_string());
        };
        if !self.form.validate_form() {
            return SubmitOutcome::Invalid;
        }
        self.submit(Method::Put, record_path::<R>(id), "updated").await
    }

    /// Create or update depending on how the dialog was opened.
    pub async fn save(&mut self) -> SubmitOutcome {
        match self.form.editing() {
            Some(_) => self.update().await,
            None => self.create().await,
        }
    }

    pub async fn delete(&mut self, id: RecordId) -> SubmitOutcome {
        match self.api.delete(&record_path::<R>(id)).await {
            Ok(env) if env.success => {
                tracing::info!(endpoint = R::ENDPOINT, %id, "record deleted");
                self.items.retain(|item| item.id() != id);
                self.notifier
                    .notify(Notification::success(format!("{} deleted successfully.", R::LABEL)));
                self.fetch_all().await;
                SubmitOutcome::Saved
            }
            Ok(env) => self.rejected(env),
            Err(e) => self.failed(e),
        }
    }

    async fn submit(&mut self, method: Method, path: String, verb: &str) -> SubmitOutcome {
        let request = ApiRequest::new(method, path).with_body(self.form.to_wire());

        self.form.set_saving(true);
        let result = self.api.send(request).await;
        self.form.set_saving(false);

        match result {
            Ok(env) if env.success => {
                tracing::info!(endpoint = R::ENDPOINT, %method, "record {verb}");
                self.error = None;
                self.notifier
                    .notify(Notification::success(format!("{} {verb} successfully.", R::LABEL)));
                self.form.close();
                self.fetch_all().await;
                SubmitOutcome::Saved
            }
            Ok(env) => self.rejected(env),
            Err(e) => self.failed(e),
        }
    }

    fn rejected(&mut self, env: ApiEnvelope) -> SubmitOutcome {
        let errors: BTreeMap<String, Vec<String>> = env.errors.clone().unwrap_or_default();
        self.form.merge_server_errors(&errors);

        let message = env.message_or(&format!("The {} could not be saved.", R::LABEL.to_lowercase()));
        tracing::debug!(endpoint = R::ENDPOINT, fields = errors.len(), "request rejected");
        self.fail(message.clone());
        SubmitOutcome::Rejected(message)
    }

    fn failed(&mut self, error: TransportError) -> SubmitOutcome {
        tracing::warn!(endpoint = R::ENDPOINT, error = %error, "request failed");
        let message = error.user_message();
        self.fail(message.clone());
        SubmitOutcome::Failed(message)
    }

    fn fail(&mut self, message: String) {
        self.notifier.notify(Notification::error(message.clone()));
        self.error = Some(message);
    }
}

fn record_path<R: Resource>(id: RecordId) -> String {
    format!("{}/{}", R::ENDPOINT, id)
}

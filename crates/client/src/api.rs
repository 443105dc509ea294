//! Typed helpers over a `Transport`.

use std::sync::Arc;

use serde_json::Value;

use crate::envelope::ApiEnvelope;
use crate::error::TransportError;
use crate::transport::{ApiRequest, Method, Transport};

/// Cheap-to-clone handle the stores share.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiEnvelope, TransportError> {
        self.transport.send(request).await
    }

    pub async fn get(&self, path: &str) -> Result<ApiEnvelope, TransportError> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ApiEnvelope, TransportError> {
        self.send(ApiRequest::new(Method::Post, path).with_body(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<ApiEnvelope, TransportError> {
        self.send(ApiRequest::new(Method::Post, path)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<ApiEnvelope, TransportError> {
        self.send(ApiRequest::new(Method::Put, path).with_body(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiEnvelope, TransportError> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }
}

//! Scripted in-memory transport.
//!
//! Replies are queued per `(method, path)`; the last queued reply for a route
//! is sticky so polling loops can call the same endpoint repeatedly.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::ApiEnvelope;
use crate::error::TransportError;
use crate::transport::{ApiRequest, Method, Transport};

#[derive(Debug, Clone)]
pub enum Scripted {
    Envelope(ApiEnvelope),
    Unauthenticated,
    Unavailable(String),
    Status(u16, String),
    /// Never resolves.
    Hang,
}

#[derive(Debug, Clone)]
struct Step {
    delay: Duration,
    reply: Scripted,
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Step>>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, method: Method, path: &str, delay: Duration, reply: Scripted) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Step { delay, reply });
        self
    }

    pub fn reply(&self, method: Method, path: &str, envelope: ApiEnvelope) -> &Self {
        self.script(method, path, Duration::ZERO, Scripted::Envelope(envelope))
    }

    pub fn reply_after(&self, method: Method, path: &str, delay: Duration, envelope: ApiEnvelope) -> &Self {
        self.script(method, path, delay, Scripted::Envelope(envelope))
    }

    pub fn fail(&self, method: Method, path: &str, reply: Scripted) -> &Self {
        self.script(method, path, Duration::ZERO, reply)
    }

    /// Number of requests received for a route.
    pub fn calls(&self, method: Method, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    /// Body of the most recent request for a route.
    pub fn last_body(&self, method: Method, path: &str) -> Option<Value> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .and_then(|r| r.body.clone())
    }

    fn next_step(&self, method: Method, path: &str) -> Option<Step> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiEnvelope, TransportError> {
        self.log.lock().unwrap().push(request.clone());

        let Some(step) = self.next_step(request.method, &request.path) else {
            return Err(TransportError::Status {
                status: 404,
                body: format!("no scripted reply for {} {}", request.method, request.path),
            });
        };

        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }

        match step.reply {
            Scripted::Envelope(envelope) => Ok(envelope),
            Scripted::Unauthenticated => Err(TransportError::Unauthenticated),
            Scripted::Unavailable(reason) => Err(TransportError::Unavailable(reason)),
            Scripted::Status(status, body) => Err(TransportError::Status { status, body }),
            Scripted::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn last_reply_is_sticky() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Method::Get, "/api/permissions", ApiEnvelope::ok(json!([])))
            .reply(Method::Get, "/api/permissions", ApiEnvelope::ok(json!(["vendors.read"])));

        for expected in [json!([]), json!(["vendors.read"]), json!(["vendors.read"])] {
            let env = transport
                .send(ApiRequest::new(Method::Get, "/api/permissions"))
                .await
                .unwrap();
            assert_eq!(env.data, Some(expected));
        }
        assert_eq!(transport.calls(Method::Get, "/api/permissions"), 3);
    }

    #[tokio::test]
    async fn unscripted_routes_answer_not_found() {
        let transport = ScriptedTransport::new();
        let err = transport
            .send(ApiRequest::new(Method::Delete, "/api/vendors/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }
}

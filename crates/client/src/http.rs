//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::TransportError;
use crate::transport::{ApiRequest, Method, Transport};

/// HTTP transport against the ERP REST API.
///
/// Session continuity relies on the cookie store kept by the inner client;
/// an optional bearer token is sent on every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    api_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpTransport {
    pub fn new(api_url: String) -> Result<Self, TransportError> {
        Self::build(api_url, None, None)
    }

    pub fn with_token(api_url: String, token: String) -> Result<Self, TransportError> {
        Self::build(api_url, Some(token), None)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::build(
            config.api_base_url.clone(),
            config.auth_token.clone(),
            Some(config.request_timeout),
        )
    }

    fn build(
        api_url: String,
        token: Option<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            client: builder.build()?,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether the backend health endpoint (`/up`) answers with a 2xx.
    pub async fn check_connectivity(&self) -> bool {
        let url = format!("{}/up", self.api_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut req = self
            .client
            .request(method, &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiEnvelope, TransportError> {
        let mut req = self.request(request.method, &request.path);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Unavailable(e.to_string())
            } else {
                TransportError::Http(e)
            }
        })?;

        let status = resp.status();
        tracing::debug!(method = %request.method, path = %request.path, status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(TransportError::Unauthenticated);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(ApiEnvelope::ok_empty());
        }

        let body = resp.text().await?;
        match serde_json::from_str::<ApiEnvelope>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(TransportError::Decode(e.to_string())),
            Err(_) => Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

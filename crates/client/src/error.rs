use thiserror::Error;

/// Failures talking to the REST backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the session (HTTP 401).
    #[error("unauthenticated")]
    Unauthenticated,

    /// Non-success status whose body was not an envelope.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The backend could not be reached at all.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, TransportError::Unauthenticated)
    }

    /// Short text for the generic error slot and toasts.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Http(e) if e.is_timeout() => "The server took too long to respond.".to_string(),
            TransportError::Http(_) | TransportError::Unavailable(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            TransportError::Unauthenticated => "Your session has expired. Please sign in again.".to_string(),
            TransportError::Status { status, .. } => format!("The server returned an error ({status})."),
            TransportError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

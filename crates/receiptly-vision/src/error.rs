use thiserror::Error;

/// Failures talking to the vision model provider
#[derive(Debug, Error)]
pub enum VisionError {
    /// The provider answered with a non-success HTTP status.
    #[error("AI service responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("Request to AI service failed: {0}")]
    Transport(String),

    /// The response body was not a chat completion.
    #[error("Unexpected AI service response: {0}")]
    Decode(String),
}

impl VisionError {
    /// Upstream HTTP status, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            VisionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status >= 500)
    }
}

use std::time::Duration;
use thiserror::Error;

/// Failure of a single request against the orders API.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
        /// Server-supplied wait before retrying, if any.
        retry_after: Option<Duration>,
    },

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An endpoint or cursor could not be turned into a request URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A success response whose body does not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The credential cannot be sent as an HTTP header.
    #[error("Invalid credential: {0}")]
    Credential(String),
}

impl ConnectorError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ConnectorError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

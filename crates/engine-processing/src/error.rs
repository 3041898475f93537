use connectors::error::ConnectorError;
use engine_core::deadline::Interrupt;
use std::time::Duration;
use thiserror::Error;

/// Run-terminal failures of a window scan. There is no partial result: any of
/// these aborts the fetch and nothing is handed downstream.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-retryable failure: unreachable source or a client error other than 429.
    #[error("Request failed: {0}")]
    Request(#[source] ConnectorError),

    #[error("Retry attempts exhausted after {attempts} attempts, last status {status}: {body}")]
    ExhaustedRetries {
        attempts: usize,
        status: u16,
        body: String,
    },

    #[error("Fetch did not finish within {budget:?}")]
    Timeout { budget: Duration },

    /// The source answered, but not in the shape the scan relies on.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Fetch cancelled")]
    Cancelled,
}

impl From<Interrupt> for FetchError {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::TimedOut { budget } => FetchError::Timeout { budget },
            Interrupt::Cancelled => FetchError::Cancelled,
        }
    }
}

impl From<ConnectorError> for FetchError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Decode(msg) => FetchError::Protocol(msg),
            ConnectorError::InvalidUrl { url, reason } => {
                FetchError::Protocol(format!("unusable page cursor '{url}': {reason}"))
            }
            other => FetchError::Request(other),
        }
    }
}

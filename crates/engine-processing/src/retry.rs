use connectors::error::ConnectorError;
use engine_core::retry::RetryDisposition;

/// Rate limiting and server errors are transient; everything else stops the
/// scan on the first occurrence.
pub fn classify_connector_error(err: &ConnectorError) -> RetryDisposition {
    match err {
        ConnectorError::Status {
            status,
            retry_after,
            ..
        } if is_retryable_status(*status) => match retry_after {
            Some(hint) => RetryDisposition::RetryAfter(*hint),
            None => RetryDisposition::Retry,
        },
        ConnectorError::Status { .. } => RetryDisposition::Stop,
        ConnectorError::Transport(_) => RetryDisposition::Stop,
        ConnectorError::InvalidUrl { .. } => RetryDisposition::Stop,
        ConnectorError::Decode(_) => RetryDisposition::Stop,
        ConnectorError::Credential(_) => RetryDisposition::Stop,
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

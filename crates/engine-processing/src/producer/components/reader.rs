use crate::{error::FetchError, retry::classify_connector_error};
use connectors::{
    error::ConnectorError,
    rest::{Page, PageRequest, PageSource},
};
use engine_core::{
    deadline::Deadline,
    metrics::Metrics,
    retry::{RetryError, RetryPolicy},
};
use std::sync::Arc;
use tracing::warn;

/// Fetches a single page, retrying the same request on transient failures.
pub struct PageReader {
    source: Arc<dyn PageSource>,
    retry: RetryPolicy,
    metrics: Metrics,
}

impl PageReader {
    pub fn new(source: Arc<dyn PageSource>, retry: RetryPolicy, metrics: Metrics) -> Self {
        Self {
            source,
            retry,
            metrics,
        }
    }

    pub async fn fetch(
        &self,
        request: &PageRequest,
        deadline: &Deadline,
    ) -> Result<Page, FetchError> {
        let result = self
            .retry
            .run(
                deadline,
                || {
                    self.metrics.increment_requests(1);
                    self.source.fetch_page(request)
                },
                classify_connector_error,
                |attempt, delay, err| {
                    self.metrics.increment_retries(1);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient failure fetching page, backing off"
                    );
                },
            )
            .await;

        match result {
            Ok(page) => Ok(page),
            Err(RetryError::Fatal(err)) => Err(err.into()),
            Err(RetryError::AttemptsExceeded { error, attempts }) => match error {
                ConnectorError::Status { status, body, .. } => Err(FetchError::ExhaustedRetries {
                    attempts,
                    status,
                    body,
                }),
                other => Err(other.into()),
            },
            Err(RetryError::Interrupted(interrupt)) => Err(interrupt.into()),
        }
    }
}

//! Paginated fetch over one creation-time window.
//!
//! Pages are produced lazily by [`OrderFetcher::pages`]: each step issues one
//! request (with retries), yields the page and derives the next request from
//! the page's cursor. The stream ends when a page carries no cursor.
//! [`OrderFetcher::fetch_all`] folds that stream into a single record list.

use crate::{
    error::FetchError,
    producer::{components::reader::PageReader, config::FetchConfig},
};
use connectors::rest::{OrdersQuery, Page, PageRequest, PageSource, Url};
use engine_core::{deadline::Deadline, metrics::Metrics};
use futures::{Stream, TryStreamExt, stream};
use model::{core::window::TimeWindow, records::raw::RawRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct OrderFetcher {
    endpoint: Url,
    config: FetchConfig,
    reader: PageReader,
    metrics: Metrics,
    cancel: CancellationToken,
}

struct ScanStep {
    request: PageRequest,
    pages_read: usize,
}

impl OrderFetcher {
    pub fn new(source: Arc<dyn PageSource>, endpoint: Url, config: FetchConfig) -> Self {
        let metrics = Metrics::new();
        let reader = PageReader::new(source, config.retry.clone(), metrics.clone());
        Self {
            endpoint,
            config,
            reader,
            metrics,
            cancel: CancellationToken::new(),
        }
    }

    /// Ties the scan to an external cancellation token (e.g. a signal handler).
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn query_for(&self, window: TimeWindow) -> OrdersQuery {
        OrdersQuery::new(window)
            .with_page_size(self.config.page_size)
            .with_status(self.config.status.clone())
            .with_fulfillment_status(self.config.fulfillment_hint.clone())
    }

    fn deadline(&self) -> Deadline {
        match self.config.overall_timeout {
            Some(budget) => Deadline::after(budget, self.cancel.clone()),
            None => Deadline::unbounded(self.cancel.clone()),
        }
    }

    /// Lazily yields the window's pages in source order.
    pub fn pages<'a>(
        &'a self,
        window: TimeWindow,
        deadline: &'a Deadline,
    ) -> impl Stream<Item = Result<Page, FetchError>> + 'a {
        let first = ScanStep {
            request: PageRequest::first(&self.endpoint, &self.query_for(window)),
            pages_read: 0,
        };

        stream::try_unfold(Some(first), move |step| async move {
            let Some(step) = step else {
                return Ok(None);
            };
            self.next_page(step, deadline).await.map(Some)
        })
    }

    async fn next_page(
        &self,
        step: ScanStep,
        deadline: &Deadline,
    ) -> Result<(Page, Option<ScanStep>), FetchError> {
        if step.pages_read >= self.config.max_pages {
            return Err(FetchError::Protocol(format!(
                "source still returned a next-page cursor after {} pages",
                self.config.max_pages
            )));
        }

        debug!(page = step.pages_read + 1, url = %step.request, "Fetching page");
        let page = self.reader.fetch(&step.request, deadline).await?;
        let pages_read = step.pages_read + 1;

        self.metrics.increment_pages(1);
        self.metrics.increment_records(page.records.len() as u64);
        info!(
            page = pages_read,
            records = page.records.len(),
            has_next = page.next.is_some(),
            "Fetched page"
        );

        let next = match &page.next {
            None => None,
            Some(cursor) => {
                let request = PageRequest::from_cursor(&self.endpoint, cursor)?;
                if request == step.request {
                    return Err(FetchError::Protocol(format!(
                        "next-page cursor points back at the current page: {request}"
                    )));
                }
                Some(ScanStep {
                    request,
                    pages_read,
                })
            }
        };

        Ok((page, next))
    }

    /// Drains every page of the window into memory, in source order.
    pub async fn fetch_all(&self, window: TimeWindow) -> Result<Vec<RawRecord>, FetchError> {
        let deadline = self.deadline();
        info!(%window, "Fetching orders");

        let records = self
            .pages(window, &deadline)
            .try_fold(Vec::new(), |mut acc, page| async move {
                acc.extend(page.records);
                Ok(acc)
            })
            .await?;

        let snapshot = self.metrics.snapshot();
        info!(
            records = records.len(),
            pages = snapshot.pages_fetched,
            retries = snapshot.retry_count,
            "Fetch complete"
        );
        Ok(records)
    }
}

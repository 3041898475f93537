use crate::error::RunError;
use connectors::rest::{HttpPageSource, HttpSourceConfig, PageSource};
use engine_config::settings::{FetchSettings, Settings};
use engine_processing::producer::{FetchConfig, OrderFetcher};
use model::filter::ReportVariant;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Server-side fulfillment pre-filter matching a report variant.
pub fn fulfillment_hint(variant: ReportVariant) -> Option<String> {
    variant
        .checks_fulfillment()
        .then(|| "unfulfilled".to_string())
}

pub fn fetch_config(settings: &Settings) -> FetchConfig {
    let fetch = &settings.fetch;
    FetchConfig {
        page_size: fetch.page_size,
        status: fetch.status.clone(),
        fulfillment_hint: fulfillment_hint(settings.filter.variant),
        retry: fetch.retry.clone(),
        overall_timeout: fetch.overall_timeout,
        max_pages: fetch.max_pages,
    }
}

pub fn http_source(fetch: &FetchSettings) -> Result<Arc<dyn PageSource>, RunError> {
    let config = HttpSourceConfig {
        request_timeout: fetch.request_timeout,
        ..HttpSourceConfig::new(fetch.credential.clone())
    };
    Ok(Arc::new(HttpPageSource::new(config)?))
}

pub fn build_fetcher(
    settings: &Settings,
    source: Arc<dyn PageSource>,
    cancel: CancellationToken,
) -> OrderFetcher {
    OrderFetcher::new(source, settings.fetch.endpoint.clone(), fetch_config(settings))
        .with_cancellation(cancel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_only_for_unfulfilled_reports() {
        assert_eq!(
            fulfillment_hint(ReportVariant::Unfulfilled).as_deref(),
            Some("unfulfilled")
        );
        assert_eq!(fulfillment_hint(ReportVariant::AllOrders), None);
    }
}

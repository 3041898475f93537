use crate::{
    error::RunError,
    execution::factory::{build_fetcher, http_source},
};
use connectors::rest::PageSource;
use engine_config::{report::summary::RunSummary, settings::Settings};
use engine_processing::transform::filter_records;
use model::{core::window::TimeWindow, records::row::RowRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Rows for downstream report assembly, plus what it took to produce them.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rows: Vec<RowRecord>,
    pub summary: RunSummary,
}

/// One stateless run over `window` against the configured HTTP source.
pub async fn run(
    settings: &Settings,
    window: TimeWindow,
    cancel: CancellationToken,
) -> Result<RunOutput, RunError> {
    let source = http_source(&settings.fetch)?;
    run_with_source(settings, source, window, cancel).await
}

/// Same as [`run`] with an explicit page source.
pub async fn run_with_source(
    settings: &Settings,
    source: Arc<dyn PageSource>,
    window: TimeWindow,
    cancel: CancellationToken,
) -> Result<RunOutput, RunError> {
    let filter_config = settings.filter.filter_config();
    info!(
        %window,
        variant = %filter_config.variant(),
        cities = ?filter_config.allowed_cities().collect::<Vec<_>>(),
        "Starting run"
    );

    let fetcher = build_fetcher(settings, source, cancel);
    let records = fetcher.fetch_all(window).await?;

    let outcome = filter_records(&records, &filter_config);
    let stats = outcome.stats;
    let summary = RunSummary::new(window, filter_config.variant(), fetcher.metrics().snapshot())
        .with_filter_counts(
            stats.orders_kept,
            stats.rows,
            stats.excluded,
            stats.gross_total,
        );
    summary.log();

    Ok(RunOutput {
        rows: outcome.rows,
        summary,
    })
}

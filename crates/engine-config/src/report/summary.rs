use bigdecimal::BigDecimal;
use engine_core::metrics::MetricsSnapshot;
use model::{core::window::TimeWindow, filter::ReportVariant};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Outcome of one run, for logs and for the caller's hand-off.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub window: TimeWindow,
    pub variant: ReportVariant,
    pub requests_sent: u64,
    pub retries: u64,
    pub pages: u64,
    pub records_fetched: u64,
    pub orders_kept: usize,
    pub rows: usize,
    pub excluded: BTreeMap<String, usize>,
    pub gross_total: BigDecimal,
}

impl RunSummary {
    pub fn new(window: TimeWindow, variant: ReportVariant, fetch: MetricsSnapshot) -> Self {
        RunSummary {
            window,
            variant,
            requests_sent: fetch.requests_sent,
            retries: fetch.retry_count,
            pages: fetch.pages_fetched,
            records_fetched: fetch.records_fetched,
            orders_kept: 0,
            rows: 0,
            excluded: BTreeMap::new(),
            gross_total: BigDecimal::default(),
        }
    }

    pub fn with_filter_counts<'a>(
        mut self,
        orders_kept: usize,
        rows: usize,
        excluded: impl IntoIterator<Item = (&'a str, usize)>,
        gross_total: BigDecimal,
    ) -> Self {
        self.orders_kept = orders_kept;
        self.rows = rows;
        self.excluded = excluded
            .into_iter()
            .map(|(rule, count)| (rule.to_string(), count))
            .collect();
        self.gross_total = gross_total;
        self
    }

    pub fn log(&self) {
        info!(
            window = %self.window,
            variant = %self.variant,
            pages = self.pages,
            requests = self.requests_sent,
            retries = self.retries,
            fetched = self.records_fetched,
            kept = self.orders_kept,
            rows = self.rows,
            gross_total = %self.gross_total,
            "Run summary"
        );
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

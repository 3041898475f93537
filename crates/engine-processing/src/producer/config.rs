use engine_core::retry::RetryPolicy;
use std::time::Duration;

/// Defensive bound on the number of pages in one scan.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Configuration for one window scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Records per page requested from the source (capped at the source maximum).
    pub page_size: u16,

    /// Server-side order status pre-filter.
    pub status: String,

    /// Optional server-side fulfillment pre-filter.
    pub fulfillment_hint: Option<String>,

    /// Per-request retry behavior for 429/5xx answers.
    pub retry: RetryPolicy,

    /// Wall-clock budget for the whole scan, retries and waits included.
    pub overall_timeout: Option<Duration>,

    /// Scan fails with a protocol error once this many pages were read and
    /// the source still returns a cursor.
    pub max_pages: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 250,
            status: "any".to_string(),
            fulfillment_hint: None,
            retry: RetryPolicy::default(),
            overall_timeout: Some(Duration::from_secs(600)),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

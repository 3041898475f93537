pub mod filter;
pub mod flatten;
pub mod pipeline;

use model::{
    filter::FilterConfig,
    records::{raw::RawRecord, row::RowRecord},
};

pub use flatten::{FilterOutcome, FilterStats, filter_records};

/// Pure reduction of fetched orders to report rows. Never fails; see
/// [`filter_records`] for the variant that also reports exclusion counts.
pub fn filter_and_flatten(records: &[RawRecord], config: &FilterConfig) -> Vec<RowRecord> {
    filter_records(records, config).rows
}

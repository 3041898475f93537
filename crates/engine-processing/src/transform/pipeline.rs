use crate::transform::filter::{CityFilter, NotCancelledFilter, RecordFilter, UnfulfilledFilter};
use model::{filter::FilterConfig, records::order::OrderView};
use std::sync::Arc;

pub trait FilterPipelineExt {
    fn add_if<T, F>(self, condition: bool, factory: F) -> Self
    where
        T: RecordFilter + 'static,
        F: FnOnce() -> T;
}

/// Ordered conjunction of record predicates.
#[derive(Clone)]
pub struct FilterPipeline {
    filters: Vec<Arc<dyn RecordFilter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Cancellation, city and (for the unfulfilled report) fulfillment checks.
    pub fn for_config(config: &FilterConfig) -> Self {
        Self::new()
            .add_filter(NotCancelledFilter)
            .add_filter(CityFilter::new(config.clone()))
            .add_if(config.variant().checks_fulfillment(), || UnfulfilledFilter)
    }

    pub fn add_filter<T: RecordFilter + 'static>(mut self, filter: T) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Name of the first predicate that rejects the order, `None` if all hold.
    pub fn rejected_by(&self, order: &OrderView<'_>) -> Option<&'static str> {
        self.filters
            .iter()
            .find(|filter| !filter.should_keep(order))
            .map(|filter| filter.name())
    }

    pub fn should_keep(&self, order: &OrderView<'_>) -> bool {
        self.rejected_by(order).is_none()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

impl FilterPipelineExt for FilterPipeline {
    fn add_if<T, F>(mut self, condition: bool, factory: F) -> Self
    where
        T: RecordFilter + 'static,
        F: FnOnce() -> T,
    {
        if condition {
            self = self.add_filter(factory());
        }
        self
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

use model::{
    filter::FilterConfig,
    records::order::{FULFILLED_STATUS, OrderView},
};

/// A single inclusion predicate over one order.
pub trait RecordFilter: Send + Sync {
    /// Stable identifier used in exclusion counts and logs.
    fn name(&self) -> &'static str;

    fn should_keep(&self, order: &OrderView<'_>) -> bool;
}

/// Drops orders that carry a cancellation timestamp.
pub struct NotCancelledFilter;

impl RecordFilter for NotCancelledFilter {
    fn name(&self) -> &'static str {
        "not_cancelled"
    }

    fn should_keep(&self, order: &OrderView<'_>) -> bool {
        !order.is_cancelled()
    }
}

/// Keeps orders whose resolved city is in the allowed set.
pub struct CityFilter {
    config: FilterConfig,
}

impl CityFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }
}

impl RecordFilter for CityFilter {
    fn name(&self) -> &'static str {
        "city"
    }

    fn should_keep(&self, order: &OrderView<'_>) -> bool {
        let city = order.city();
        !city.is_empty() && self.config.allows_city(&city)
    }
}

/// Keeps orders with units left to ship: at least one line item with a
/// positive fulfillable quantity, and an order label other than `fulfilled`.
/// Orders without any fulfillable quantity are dropped whatever their label.
pub struct UnfulfilledFilter;

impl RecordFilter for UnfulfilledFilter {
    fn name(&self) -> &'static str {
        "unfulfilled"
    }

    fn should_keep(&self, order: &OrderView<'_>) -> bool {
        let has_open_units = order
            .line_items()
            .iter()
            .any(|item| item.fulfillable_quantity > 0);

        has_open_units && order.fulfillment_status() != FULFILLED_STATUS
    }
}

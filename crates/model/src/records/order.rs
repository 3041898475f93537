//! Accessor layer over [`RawRecord`].
//!
//! Every field the filter engine reads is resolved here, with one stated
//! default per field. Nothing in this module fails: a missing or mistyped
//! sub-document degrades to the default instead of aborting the run.

use crate::{
    core::utils::{value_as_count, value_as_non_blank, value_as_text},
    records::raw::RawRecord,
};
use serde_json::Value;

pub const DEFAULT_TOTAL_PRICE: &str = "0.00";

/// Literal fulfillment label the source uses for fully shipped orders.
pub const FULFILLED_STATUS: &str = "fulfilled";

/// Line items are decoded once, when the view is built; scalar fields are
/// resolved on each call.
#[derive(Debug, Clone)]
pub struct OrderView<'a> {
    doc: &'a Value,
    items: Vec<LineItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    pub title: String,
    pub quantity: u64,
    pub fulfillable_quantity: u64,
}

/// Order-level scalars copied next to every line item of a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    pub order_id: String,
    pub order_number: String,
    pub city: String,
    pub phone: String,
    pub financial_status: String,
    pub total_price: String,
}

impl<'a> OrderView<'a> {
    pub fn new(record: &'a RawRecord) -> Self {
        let doc = record.document();
        let items = doc
            .get("line_items")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(line_item).collect())
            .unwrap_or_default();
        OrderView { doc, items }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.doc.get(name).filter(|v| !v.is_null())
    }

    fn nested(&self, path: &[&str]) -> Option<&'a Value> {
        path.iter()
            .try_fold(self.doc, |node, key| node.get(*key))
            .filter(|v| !v.is_null())
    }

    /// Source identifier. Default: `""`.
    pub fn id(&self) -> String {
        value_as_text(self.field("id")).unwrap_or_default()
    }

    /// Display number (`name`, e.g. `#1001`), then `order_number`, then `number`.
    /// Default: `""`.
    pub fn number(&self) -> String {
        ["name", "order_number", "number"]
            .iter()
            .find_map(|key| value_as_non_blank(self.field(key)))
            .unwrap_or_default()
    }

    /// Cancellation timestamp; `None` when absent or null.
    pub fn cancelled_at(&self) -> Option<String> {
        value_as_text(self.field("cancelled_at"))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at().is_some()
    }

    /// Order-level fulfillment label. Default: `""` (the source sends null for
    /// orders with nothing shipped yet).
    pub fn fulfillment_status(&self) -> String {
        value_as_text(self.field("fulfillment_status")).unwrap_or_default()
    }

    /// Default: `""`.
    pub fn financial_status(&self) -> String {
        value_as_text(self.field("financial_status")).unwrap_or_default()
    }

    /// Decimal amount as sent by the source. Default: [`DEFAULT_TOTAL_PRICE`].
    pub fn total_price(&self) -> String {
        value_as_non_blank(self.field("total_price"))
            .unwrap_or_else(|| DEFAULT_TOTAL_PRICE.to_string())
    }

    /// `shipping_address.city`, else `customer.default_address.city`.
    /// Default: `""`.
    pub fn city(&self) -> String {
        value_as_non_blank(self.nested(&["shipping_address", "city"]))
            .or_else(|| value_as_non_blank(self.nested(&["customer", "default_address", "city"])))
            .map(|city| city.trim().to_string())
            .unwrap_or_default()
    }

    /// `shipping_address.phone`, else `phone`, else `customer.phone`.
    /// Default: `""`.
    pub fn phone(&self) -> String {
        value_as_non_blank(self.nested(&["shipping_address", "phone"]))
            .or_else(|| value_as_non_blank(self.field("phone")))
            .or_else(|| value_as_non_blank(self.nested(&["customer", "phone"])))
            .unwrap_or_default()
    }

    /// Line items in source order. A missing or non-array field yields none.
    pub fn line_items(&self) -> &[LineItemView] {
        &self.items
    }

    pub fn into_line_items(self) -> Vec<LineItemView> {
        self.items
    }

    /// Resolves every row-level scalar in one pass.
    pub fn header(&self) -> OrderHeader {
        OrderHeader {
            order_id: self.id(),
            order_number: self.number(),
            city: self.city(),
            phone: self.phone(),
            financial_status: self.financial_status(),
            total_price: self.total_price(),
        }
    }
}

fn line_item(item: &Value) -> LineItemView {
    LineItemView {
        title: value_as_text(item.get("title")).unwrap_or_default(),
        quantity: value_as_count(item.get("quantity")),
        fulfillable_quantity: value_as_count(item.get("fulfillable_quantity")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::new(value)
    }

    #[test]
    fn test_empty_document_degrades_to_defaults() {
        let raw = record(json!({}));
        let view = raw.view();
        assert_eq!(view.id(), "");
        assert_eq!(view.number(), "");
        assert_eq!(view.city(), "");
        assert_eq!(view.phone(), "");
        assert_eq!(view.total_price(), DEFAULT_TOTAL_PRICE);
        assert!(!view.is_cancelled());
        assert!(view.line_items().is_empty());
    }

    #[test]
    fn test_non_object_document_degrades_to_defaults() {
        let raw = record(json!("not an order"));
        assert_eq!(raw.view().city(), "");
        assert!(raw.view().line_items().is_empty());
    }

    #[test]
    fn test_city_falls_back_to_customer_default_address() {
        let raw = record(json!({
            "shipping_address": null,
            "customer": { "default_address": { "city": " Chennai " } }
        }));
        assert_eq!(raw.view().city(), "Chennai");

        let blank_shipping = record(json!({
            "shipping_address": { "city": "" },
            "customer": { "default_address": { "city": "Pune" } }
        }));
        assert_eq!(blank_shipping.view().city(), "Pune");
    }

    #[test]
    fn test_shipping_city_wins_over_customer() {
        let raw = record(json!({
            "shipping_address": { "city": "Mumbai" },
            "customer": { "default_address": { "city": "Pune" } }
        }));
        assert_eq!(raw.view().city(), "Mumbai");
    }

    #[test]
    fn test_phone_precedence() {
        let all = record(json!({
            "phone": "+91-order",
            "shipping_address": { "phone": "+91-ship" },
            "customer": { "phone": "+91-cust" }
        }));
        assert_eq!(all.view().phone(), "+91-ship");

        let no_shipping = record(json!({
            "phone": "+91-order",
            "shipping_address": { "phone": null },
            "customer": { "phone": "+91-cust" }
        }));
        assert_eq!(no_shipping.view().phone(), "+91-order");

        let customer_only = record(json!({ "phone": "", "customer": { "phone": "+91-cust" } }));
        assert_eq!(customer_only.view().phone(), "+91-cust");
    }

    #[test]
    fn test_cancelled_at_null_is_not_cancelled() {
        assert!(!record(json!({ "cancelled_at": null })).view().is_cancelled());
        assert!(
            record(json!({ "cancelled_at": "2024-01-01T10:00:00Z" }))
                .view()
                .is_cancelled()
        );
    }

    #[test]
    fn test_header_resolves_row_scalars_once() {
        let raw = record(json!({
            "id": 42,
            "order_number": 1042,
            "financial_status": "pending",
            "customer": { "phone": "+91-cust", "default_address": { "city": "Pune" } },
            "line_items": [{ "title": "Chai", "quantity": 1, "fulfillable_quantity": 1 }]
        }));
        let view = raw.view();

        assert_eq!(
            view.header(),
            OrderHeader {
                order_id: "42".to_string(),
                order_number: "1042".to_string(),
                city: "Pune".to_string(),
                phone: "+91-cust".to_string(),
                financial_status: "pending".to_string(),
                total_price: DEFAULT_TOTAL_PRICE.to_string(),
            }
        );
        assert_eq!(view.clone().into_line_items(), view.line_items().to_vec());
    }

    #[test]
    fn test_line_items_tolerate_bad_fields() {
        let raw = record(json!({
            "line_items": [
                { "title": "Tea", "quantity": 2, "fulfillable_quantity": "1" },
                { "quantity": null },
                "garbage"
            ]
        }));
        let view = raw.view();
        let items = view.line_items();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0],
            LineItemView {
                title: "Tea".to_string(),
                quantity: 2,
                fulfillable_quantity: 1
            }
        );
        assert_eq!(items[1].title, "");
        assert_eq!(items[2].quantity, 0);
    }

    #[test]
    fn test_number_prefers_display_name() {
        let raw = record(json!({ "id": 450789469, "name": "#1001", "order_number": 1001 }));
        assert_eq!(raw.view().number(), "#1001");
        assert_eq!(raw.view().id(), "450789469");

        let no_name = record(json!({ "order_number": 1002 }));
        assert_eq!(no_name.view().number(), "1002");
    }
}

use crate::transform::pipeline::FilterPipeline;
use bigdecimal::BigDecimal;
use model::{
    filter::FilterConfig,
    records::{raw::RawRecord, row::RowRecord},
};
use serde::Serialize;
use std::{collections::BTreeMap, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterStats {
    pub orders_seen: usize,
    pub orders_kept: usize,
    pub rows: usize,
    /// Orders rejected, keyed by the first predicate that failed.
    pub excluded: BTreeMap<&'static str, usize>,
    /// Sum of `total_price` over kept orders; unparseable amounts count as zero.
    pub gross_total: BigDecimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub rows: Vec<RowRecord>,
    pub stats: FilterStats,
}

/// Reduces raw orders to report rows: one row per line item of every order
/// that passes all predicates, in input order.
pub fn filter_records(records: &[RawRecord], config: &FilterConfig) -> FilterOutcome {
    let pipeline = FilterPipeline::for_config(config);
    let mut outcome = FilterOutcome::default();

    for record in records {
        let order = record.view();
        outcome.stats.orders_seen += 1;

        if let Some(rule) = pipeline.rejected_by(&order) {
            debug!(order = %order.number(), rule, "Order excluded");
            *outcome.stats.excluded.entry(rule).or_default() += 1;
            continue;
        }

        let header = order.header();
        outcome.stats.orders_kept += 1;
        outcome.stats.gross_total += parse_amount(&header.total_price);
        outcome.rows.extend(
            order
                .into_line_items()
                .into_iter()
                .map(|item| RowRecord::from_parts(&header, item)),
        );
    }

    outcome.stats.rows = outcome.rows.len();
    outcome
}

fn parse_amount(raw: &str) -> BigDecimal {
    BigDecimal::from_str(raw.trim()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::filter::ReportVariant;
    use serde_json::json;

    fn chennai_order() -> RawRecord {
        RawRecord::new(json!({
            "id": 1001,
            "name": "#1001",
            "cancelled_at": null,
            "fulfillment_status": null,
            "financial_status": "paid",
            "total_price": "1250.50",
            "phone": "+91-44-order",
            "shipping_address": { "city": "Chennai", "phone": "+91-44-ship" },
            "line_items": [
                { "title": "Filter coffee", "quantity": 2, "fulfillable_quantity": 2 },
                { "title": "Idli mix", "quantity": 1, "fulfillable_quantity": 1 }
            ]
        }))
    }

    fn mumbai_order() -> RawRecord {
        RawRecord::new(json!({
            "id": 1002,
            "name": "#1002",
            "cancelled_at": null,
            "fulfillment_status": null,
            "total_price": "99.00",
            "shipping_address": { "city": "Mumbai" },
            "line_items": [{ "title": "Vada pav", "quantity": 4, "fulfillable_quantity": 4 }]
        }))
    }

    #[test]
    fn test_scenario_keeps_chennai_rows_in_item_order() {
        let config = FilterConfig::new(["Chennai"], ReportVariant::Unfulfilled);
        let outcome = filter_records(&[chennai_order(), mumbai_order()], &config);

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].item_title, "Filter coffee");
        assert_eq!(outcome.rows[1].item_title, "Idli mix");
        for row in &outcome.rows {
            assert_eq!(row.order_number, "#1001");
            assert_eq!(row.city, "Chennai");
            assert_eq!(row.phone, "+91-44-ship");
            assert_eq!(row.financial_status, "paid");
            assert_eq!(row.total_price, "1250.50");
        }

        assert_eq!(outcome.stats.orders_seen, 2);
        assert_eq!(outcome.stats.orders_kept, 1);
        assert_eq!(outcome.stats.excluded.get("city"), Some(&1));
        assert_eq!(outcome.stats.gross_total, BigDecimal::from_str("1250.50").unwrap());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let config = FilterConfig::new(["chennai", "mumbai"], ReportVariant::AllOrders);
        let input = vec![chennai_order(), mumbai_order()];

        let first = filter_records(&input, &config);
        let second = filter_records(&input, &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first.rows).unwrap(),
            serde_json::to_vec(&second.rows).unwrap()
        );
    }

    #[test]
    fn test_cancelled_order_excluded_regardless_of_other_fields() {
        let mut doc = chennai_order().document().clone();
        doc["cancelled_at"] = json!("2024-01-01T12:00:00Z");
        let config = FilterConfig::new(["Chennai"], ReportVariant::AllOrders);

        let outcome = filter_records(&[RawRecord::new(doc)], &config);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.stats.excluded.get("not_cancelled"), Some(&1));
    }

    #[test]
    fn test_all_orders_variant_ignores_fulfillment() {
        let mut doc = chennai_order().document().clone();
        doc["fulfillment_status"] = json!("fulfilled");
        doc["line_items"][0]["fulfillable_quantity"] = json!(0);
        doc["line_items"][1]["fulfillable_quantity"] = json!(0);
        let record = RawRecord::new(doc);

        let all = FilterConfig::new(["Chennai"], ReportVariant::AllOrders);
        assert_eq!(filter_records(&[record.clone()], &all).rows.len(), 2);

        let unfulfilled = FilterConfig::new(["Chennai"], ReportVariant::Unfulfilled);
        let outcome = filter_records(&[record], &unfulfilled);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.stats.excluded.get("unfulfilled"), Some(&1));
    }

    #[test]
    fn test_malformed_records_do_not_abort() {
        let records = vec![
            RawRecord::new(json!(null)),
            RawRecord::new(json!({ "shipping_address": "Chennai" })),
            RawRecord::new(json!({
                "shipping_address": { "city": "chennai" },
                "total_price": "n/a",
                "line_items": [{ "title": 7, "quantity": "3" }]
            })),
        ];
        let config = FilterConfig::new(["Chennai"], ReportVariant::AllOrders);
        let outcome = filter_records(&records, &config);

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].item_title, "7");
        assert_eq!(outcome.rows[0].quantity, 3);
        assert_eq!(outcome.rows[0].total_price, "n/a");
        assert_eq!(outcome.stats.gross_total, BigDecimal::default());
    }

    #[test]
    fn test_kept_order_without_items_yields_no_rows() {
        let record = RawRecord::new(json!({ "shipping_address": { "city": "Chennai" } }));
        let config = FilterConfig::new(["Chennai"], ReportVariant::AllOrders);
        let outcome = filter_records(&[record], &config);

        assert_eq!(outcome.stats.orders_kept, 1);
        assert!(outcome.rows.is_empty());
    }
}

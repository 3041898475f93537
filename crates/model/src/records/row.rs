use crate::records::order::{LineItemView, OrderHeader};
use serde::{Deserialize, Serialize};

/// One order line flattened together with its order's scalar attributes.
/// This is the unit handed to report assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    pub order_id: String,
    pub order_number: String,
    pub city: String,
    pub phone: String,
    pub financial_status: String,
    pub total_price: String,
    pub item_title: String,
    pub quantity: u64,
    pub fulfillable_quantity: u64,
}

impl RowRecord {
    pub fn from_parts(order: &OrderHeader, item: LineItemView) -> Self {
        RowRecord {
            order_id: order.order_id.clone(),
            order_number: order.order_number.clone(),
            city: order.city.clone(),
            phone: order.phone.clone(),
            financial_status: order.financial_status.clone(),
            total_price: order.total_price.clone(),
            item_title: item.title,
            quantity: item.quantity,
            fulfillable_quantity: item.fulfillable_quantity,
        }
    }
}

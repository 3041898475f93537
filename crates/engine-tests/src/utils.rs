use crate::ORDERS_PATH;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Order document shaped like the shop API's.
pub fn order(id: u64, city: &str, fulfillment_status: Value, items: &[(&str, u64, u64)]) -> Value {
    let line_items: Vec<Value> = items
        .iter()
        .map(|(title, quantity, fulfillable)| {
            json!({ "title": title, "quantity": quantity, "fulfillable_quantity": fulfillable })
        })
        .collect();

    json!({
        "id": id,
        "name": format!("#{id}"),
        "cancelled_at": null,
        "fulfillment_status": fulfillment_status,
        "financial_status": "paid",
        "total_price": "100.00",
        "phone": format!("+91-order-{id}"),
        "shipping_address": { "city": city },
        "line_items": line_items
    })
}

pub fn cancelled(mut order: Value) -> Value {
    order["cancelled_at"] = json!("2024-03-02T10:00:00Z");
    order
}

pub fn with_total(mut order: Value, total: &str) -> Value {
    order["total_price"] = json!(total);
    order
}

pub fn page_body(orders: Vec<Value>) -> Value {
    json!({ "orders": orders })
}

/// Absolute `Link` header value pointing at the page with `page_info`.
pub fn next_link(server: &MockServer, page_info: &str) -> String {
    format!(
        "<{}{ORDERS_PATH}?limit=250&page_info={page_info}>; rel=\"next\"",
        server.uri()
    )
}

/// First page: any request without a cursor. Mounted at default priority so
/// cursor mocks take precedence.
pub async fn mount_first_page(server: &MockServer, orders: Vec<Value>, next: Option<&str>) {
    let mut response = ResponseTemplate::new(200).set_body_json(page_body(orders));
    if let Some(page_info) = next {
        response = response.insert_header("link", next_link(server, page_info).as_str());
    }

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_cursor_page(
    server: &MockServer,
    page_info: &str,
    orders: Vec<Value>,
    next: Option<&str>,
) {
    let mut response = ResponseTemplate::new(200).set_body_json(page_body(orders));
    if let Some(next) = next {
        response = response.insert_header("link", next_link(server, next).as_str());
    }

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(query_param("page_info", page_info))
        .respond_with(response)
        .with_priority(1)
        .mount(server)
        .await;
}

pub async fn received_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

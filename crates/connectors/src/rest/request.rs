use crate::error::ConnectorError;
use chrono::SecondsFormat;
use model::{core::window::TimeWindow, pagination::cursor::PageCursor};
use reqwest::Url;
use std::fmt;

/// Largest page the orders API will serve.
pub const MAX_PAGE_SIZE: u16 = 250;

/// Query parameters for the first page of a window scan. Subsequent pages are
/// addressed by cursor alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersQuery {
    pub window: TimeWindow,
    pub page_size: u16,
    /// Server-side order status pre-filter (`any`, `open`, ...).
    pub status: String,
    /// Optional `fulfillment_status` hint. Narrows the scan only; results are
    /// re-checked client side.
    pub fulfillment_status: Option<String>,
}

impl OrdersQuery {
    pub fn new(window: TimeWindow) -> Self {
        OrdersQuery {
            window,
            page_size: MAX_PAGE_SIZE,
            status: "any".to_string(),
            fulfillment_status: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u16) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_fulfillment_status(mut self, hint: Option<String>) -> Self {
        self.fulfillment_status = hint;
        self
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("status", self.status.clone()),
            ("limit", self.page_size.to_string()),
            (
                "created_at_min",
                self.window
                    .start()
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ),
            (
                "created_at_max",
                self.window.end().to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ),
        ];
        if let Some(hint) = &self.fulfillment_status {
            pairs.push(("fulfillment_status", hint.clone()));
        }
        pairs
    }
}

/// A fully resolved GET target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    url: Url,
}

impl PageRequest {
    /// First page: endpoint plus the window query.
    pub fn first(endpoint: &Url, query: &OrdersQuery) -> Self {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(query.pairs());
        PageRequest { url }
    }

    /// Follow-up page. The cursor is used verbatim when absolute and resolved
    /// against the endpoint when relative.
    pub fn from_cursor(endpoint: &Url, cursor: &PageCursor) -> Result<Self, ConnectorError> {
        let url = endpoint
            .join(cursor.as_str())
            .map_err(|e| ConnectorError::InvalidUrl {
                url: cursor.to_string(),
                reason: e.to_string(),
            })?;
        Ok(PageRequest { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Parses an endpoint template such as
/// `https://shop.example/admin/api/2024-01/orders.json`.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, ConnectorError> {
    let url = Url::parse(endpoint).map_err(|e| ConnectorError::InvalidUrl {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConnectorError::InvalidUrl {
            url: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

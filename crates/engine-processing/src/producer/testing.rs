//! Scripted page source for producer tests.

use async_trait::async_trait;
use connectors::{
    error::ConnectorError,
    rest::{OrdersQuery, Page, PageRequest, PageSource, Url, request::parse_endpoint},
};
use model::{core::window::TimeWindow, pagination::cursor::PageCursor, records::raw::RawRecord};
use serde_json::json;
use std::{collections::VecDeque, sync::Mutex, time::Duration};

pub const ENDPOINT: &str = "https://shop.example/admin/api/2024-01/orders.json";

/// Replays a fixed sequence of responses, one per request, and records the
/// URLs it was asked for.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Page, ConnectorError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Page, ConnectorError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A page with `count` records numbered from 1.
    pub fn page(count: u64, next: Option<&str>) -> Page {
        Self::page_of(1..=count, next)
    }

    pub fn page_of(ids: impl IntoIterator<Item = u64>, next: Option<&str>) -> Page {
        Page {
            records: ids
                .into_iter()
                .map(|id| RawRecord::new(json!({ "id": id })))
                .collect(),
            next: next.map(|n| PageCursor::new(format!("{ENDPOINT}?page_info={n}"))),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, ConnectorError> {
        self.requests.lock().unwrap().push(request.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConnectorError::Decode("script exhausted".into())))
    }
}

pub fn status_error(status: u16, retry_after: Option<Duration>) -> ConnectorError {
    ConnectorError::Status {
        status,
        body: format!("status {status}"),
        retry_after,
    }
}

pub fn endpoint() -> Url {
    parse_endpoint(ENDPOINT).unwrap()
}

pub fn window() -> TimeWindow {
    TimeWindow::parse("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z").unwrap()
}

pub fn first_request() -> PageRequest {
    PageRequest::first(&endpoint(), &OrdersQuery::new(window()))
}

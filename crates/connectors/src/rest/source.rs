use crate::{error::ConnectorError, rest::request::PageRequest};
use async_trait::async_trait;
use model::{pagination::cursor::PageCursor, records::raw::RawRecord};

/// One successfully decoded page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<RawRecord>,
    /// `None` on the last page.
    pub next: Option<PageCursor>,
}

/// A single-attempt page fetch. Retries, pagination and deadlines are layered
/// on top by the caller.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, ConnectorError>;
}

use crate::{
    error::ConnectorError,
    rest::{
        auth::ApiCredential,
        link::next_cursor,
        request::PageRequest,
        source::{Page, PageSource},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::records::raw::RawRecord;
use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, LINK, RETRY_AFTER},
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Error bodies are cut to this many characters before they are carried in
/// errors and logs.
const MAX_ERROR_BODY_CHARS: usize = 2048;

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub credential: ApiCredential,
    /// Transport timeout for one request, including reading the body.
    pub request_timeout: Duration,
    /// JSON field holding the page's records.
    pub list_field: String,
}

impl HttpSourceConfig {
    pub fn new(credential: ApiCredential) -> Self {
        HttpSourceConfig {
            credential,
            request_timeout: Duration::from_secs(30),
            list_field: "orders".to_string(),
        }
    }
}

/// [`PageSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    list_field: String,
}

impl HttpPageSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, ConnectorError> {
        let (name, value) = config.credential.header()?;
        let mut headers = HeaderMap::new();
        headers.insert(name, value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(HttpPageSource {
            client,
            list_field: config.list_field,
        })
    }

    fn decode(&self, body: &str) -> Result<Vec<RawRecord>, ConnectorError> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| ConnectorError::Decode(format!("body is not JSON: {e}")))?;

        match document.get(&self.list_field) {
            Some(Value::Array(items)) => Ok(items.iter().cloned().map(RawRecord::new).collect()),
            Some(_) => Err(ConnectorError::Decode(format!(
                "field '{}' is not a list",
                self.list_field
            ))),
            None => Err(ConnectorError::Decode(format!(
                "missing list field '{}'",
                self.list_field
            ))),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, ConnectorError> {
        let response = self.client.get(request.url().clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = retry_after(response.headers());
            let body = truncated_body(response).await;
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                body,
                retry_after,
            });
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_cursor);
        let body = response.text().await?;
        let records = self.decode(&body)?;

        debug!(
            records = records.len(),
            has_next = next.is_some(),
            "Decoded page"
        );

        Ok(Page { records, next })
    }
}

async fn truncated_body(response: Response) -> String {
    match response.text().await {
        Ok(body) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        Err(e) => format!("<unreadable body: {e}>"),
    }
}

/// Reads `Retry-After` as (possibly fractional) seconds or as an HTTP date.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = raw.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    let at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    Some((at - Utc::now()).to_std().unwrap_or(Duration::ZERO))
}

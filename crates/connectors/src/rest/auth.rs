use crate::error::ConnectorError;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use std::fmt;

/// Static credential attached to every request. Never rendered in `Debug`
/// output or logs.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiCredential {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `<name>: <token>`, e.g. `X-Shopify-Access-Token`.
    Header { name: String, token: String },
}

impl ApiCredential {
    pub fn header(&self) -> Result<(HeaderName, HeaderValue), ConnectorError> {
        let (name, raw) = match self {
            ApiCredential::Bearer(token) => (AUTHORIZATION, format!("Bearer {token}")),
            ApiCredential::Header { name, token } => {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| ConnectorError::Credential(format!("header name: {e}")))?;
                (name, token.clone())
            }
        };

        let mut value = HeaderValue::from_str(&raw)
            .map_err(|_| ConnectorError::Credential("token is not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiCredential::Bearer(_) => f.write_str("Bearer(***)"),
            ApiCredential::Header { name, .. } => write!(f, "Header({name}: ***)"),
        }
    }
}

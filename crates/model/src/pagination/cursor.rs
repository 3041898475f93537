use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque pointer to the next page, as handed out by the source.
///
/// The token is only meaningful to the source that issued it and only for the
/// scan that produced it; it is never stored between runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(token: impl Into<String>) -> Self {
        PageCursor(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use connectors::error::ConnectorError;
use thiserror::Error;

/// Errors raised while turning environment values into run settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required key is absent or blank.
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A key is present but its value cannot be used.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The endpoint is not a usable HTTP(S) URL.
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] ConnectorError),
}

use connectors::error::ConnectorError;
use engine_config::settings::error::SettingsError;
use engine_processing::error::FetchError;
use thiserror::Error;

/// Top-level errors for one report run. All of them are terminal.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// The HTTP client could not be set up.
    #[error("Source setup failed: {0}")]
    SourceSetup(#[from] ConnectorError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl RunError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Fetch(FetchError::Cancelled))
    }
}

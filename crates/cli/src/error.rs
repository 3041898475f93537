use engine_config::settings::error::SettingsError;
use engine_runtime::error::RunError;
use model::core::window::WindowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid time window: {0}")]
    Window(#[from] WindowError),

    #[error("Failed to run the report: {0}")]
    Runner(#[from] RunError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl CliError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CliError::Runner(err) if err.is_cancelled())
    }
}

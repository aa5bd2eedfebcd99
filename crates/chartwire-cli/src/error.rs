use chartwire_core::{ChartError, SerializationError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("definition error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot infer the format of '{path}', pass --format csv|json")]
    UnknownFormat { path: String },

    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Chart(ChartError::Serialization(_)) => 4,
            Self::Chart(ChartError::Io(_)) => 10,
            Self::Chart(_) => 2,
            Self::Validation(_) => 2,
            Self::UnknownFormat { .. } => 2,
            Self::Json(_) => 2,
            Self::Config(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

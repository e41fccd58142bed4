//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Widget library error (configuration, unknown key)
    #[error("{0}")]
    Widget(#[from] floating_calculator::WidgetError),

    /// Drag gesture could not be replayed
    #[error("Drag failed: {message}")]
    Drag {
        /// Error message
        message: String,
    },

    /// Output serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a drag error
    #[must_use]
    pub fn drag(message: impl Into<String>) -> Self {
        Self::Drag {
            message: message.into(),
        }
    }
}

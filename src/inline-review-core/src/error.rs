//! Error types for review comment publishing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for publishing operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Errors raised before or around a publish run.
///
/// Per-item remote rejections and transport failures are not errors at this
/// level: they are recorded in [`crate::PublishResult`] and the run continues.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Invalid configuration: {field} - {message}")]
    Config {
        field: &'static str,
        message: String,
    },

    #[error("Invalid diff side '{0}'. Expected LEFT or RIGHT")]
    InvalidSide(String),

    #[error("Invalid feedback item: {0}")]
    InvalidFeedback(String),

    #[error("Failed to parse feedback from {source_name}: {error}")]
    Feedback {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("Failed to read feedback file {path}: {error}")]
    FeedbackIo {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl PublishError {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }
}

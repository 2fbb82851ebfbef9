//! Error types for sitemap generation.

use sitemapper_storage::StorageError;
use thiserror::Error;

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    #[error("content type '{0}' is not eligible for the sitemap")]
    NotEligible(String),

    #[error("failed to fetch entries for '{content_type}': {message}")]
    Source {
        content_type: String,
        message: String,
    },

    #[error("invalid sitemap config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GeneratorError {
    /// Whether the error was caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

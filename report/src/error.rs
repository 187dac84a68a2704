//! Error types for report building and output.

use relnorm_core::AnalysisError;
use thiserror::Error;

/// Errors that can occur while building or rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The underlying analysis failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The universe is too large for the exponential key search.
    #[error("{attributes} attributes exceed the key search limit of {limit}")]
    AttributeLimitExceeded { attributes: usize, limit: usize },
}

/// Convenience alias for results with [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;

//! Error types for the vertical content generator.
//!
//! One enum covers every failure category: configuration, input validation,
//! provider calls, prompt templates, serialization and I/O.

use thiserror::Error;

/// Unified error type for the vertical crates.
///
/// All fallible functions return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration. Fatal at start-up.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any provider call (empty brief, unknown industry)
    #[error("{0}")]
    Validation(String),

    /// A provider call failed, timed out, or returned an unusable body
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt template loading or rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error was raised by input validation rather than a failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

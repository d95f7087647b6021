//! Crate-level error type for setup concerns.
//!
//! Evaluating constraints never fails with an error: data problems become
//! failure-valued metrics ([`AnalyzerError`](crate::analyzers::AnalyzerError))
//! and those become failed constraint results. `TermError` covers what
//! happens around evaluation, such as installing the log subscriber or
//! exporting results.

use thiserror::Error;

/// Errors raised while configuring or reporting.
#[derive(Error, Debug)]
pub enum TermError {
    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TermError {
    fn from(err: serde_json::Error) -> Self {
        TermError::Serialization(err.to_string())
    }
}

/// A type alias for `Result<T, TermError>`.
pub type Result<T> = std::result::Result<T, TermError>;

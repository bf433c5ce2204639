//! Domain-level error types.

use thiserror::Error;

/// Domain errors - client-side rule failures, raised before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    BadInput(String),
}

/// Remote store errors.
///
/// `Clone` so that every caller joined onto one in-flight request receives
/// the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Blog not found: {id}")]
    NotFound { id: String },

    #[error("Failed to create blog: {0}")]
    Creation(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    BadInput(String),
}

//! Application-level error type and its user-facing messages.

use blogdesk_core::{DomainError, StoreError};
use blogdesk_infra::HttpStoreError;

use crate::controller::ControllerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Message shown to the user instead of the raw error chain.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Controller(ControllerError::Domain(DomainError::BadInput(msg))) => {
                msg.clone()
            }
            AppError::Controller(ControllerError::Store(err)) => store_message(err),
            other => other.to_string(),
        }
    }
}

pub fn store_message(err: &StoreError) -> String {
    match err {
        StoreError::Creation(_) => err.to_string(),
        StoreError::NotFound { id } => format!("No blog with id {}", id),
        StoreError::Network(_) | StoreError::Decode(_) => {
            format!("Blog service unavailable: {}", err)
        }
        StoreError::BadInput(msg) => msg.clone(),
    }
}

impl From<HttpStoreError> for AppError {
    fn from(err: HttpStoreError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Controller(ControllerError::Store(err))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Controller(ControllerError::Domain(err))
    }
}

/// Result type alias for commands.
pub type AppResult<T> = Result<T, AppError>;

//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this id
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Input failed validation
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Persistence or locking failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub(crate) fn poisoned() -> Self {
        StoreError::Storage("Lock poisoned".to_string())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Invalid { .. } => 400,
            StoreError::Storage(_) => 500,
        }
    }
}

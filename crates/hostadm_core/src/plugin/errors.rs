//! Error type for page controller operations.

use thiserror::Error;

use crate::store::StoreError;
use crate::transaction::TransactionError;
use crate::valid::ValidationError;

/// Error from a page controller operation.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Fields are individually valid but inconsistent with each other.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A single field failed its validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The merge transaction failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// The backing store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PluginError {
    /// Create a cross-field inconsistency error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}

/// Result type for page controller operations.
pub type PluginResult<T> = Result<T, PluginError>;

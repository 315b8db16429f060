//! Error types for the transaction engine.
//!
//! Errors carry context that chains through layers:
//! Transaction → Element → Operation → Detail

use std::fmt;
use std::io;

use thiserror::Error;

use crate::store::StoreError;

/// Top-level transaction error with transaction context.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// An element failed during commit. Elements that already committed
    /// stay applied; there is no rollback.
    #[error("Transaction '{transaction}' failed at '{element}': {source}")]
    CommitFailed {
        transaction: String,
        element: String,
        #[source]
        source: ElementError,
    },

    /// One or more elements failed their prepare phase. All failures
    /// are collected before reporting.
    #[error("Transaction '{transaction}' failed to prepare: {}", list_failures(.failures))]
    PrepareFailed {
        transaction: String,
        failures: Vec<PrepareFailure>,
    },

    /// Commit was requested before a successful prepare.
    #[error("Transaction '{transaction}' cannot commit before prepare")]
    NotPrepared { transaction: String },

    /// The transaction already ran to completion.
    #[error("Transaction '{transaction}' already finished as {state}")]
    Finished { transaction: String, state: String },
}

impl TransactionError {
    /// Create a commit failed error.
    pub fn commit_failed(
        transaction: impl Into<String>,
        element: impl Into<String>,
        source: ElementError,
    ) -> Self {
        Self::CommitFailed {
            transaction: transaction.into(),
            element: element.into(),
            source,
        }
    }

    /// Create a prepare failed error.
    pub fn prepare_failed(transaction: impl Into<String>, failures: Vec<PrepareFailure>) -> Self {
        Self::PrepareFailed {
            transaction: transaction.into(),
            failures,
        }
    }

    /// Create a not prepared error.
    pub fn not_prepared(transaction: impl Into<String>) -> Self {
        Self::NotPrepared {
            transaction: transaction.into(),
        }
    }

    /// Create an already finished error.
    pub fn finished(transaction: impl Into<String>, state: impl Into<String>) -> Self {
        Self::Finished {
            transaction: transaction.into(),
            state: state.into(),
        }
    }
}

/// A single element's prepare-phase failure.
#[derive(Debug, Clone)]
pub struct PrepareFailure {
    /// Title of the element that failed.
    pub element: String,
    /// Why its prepare was rejected.
    pub reason: String,
}

impl fmt::Display for PrepareFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.element, self.reason)
    }
}

fn list_failures(failures: &[PrepareFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error from a transaction element with operation context.
#[derive(Error, Debug)]
pub enum ElementError {
    /// The settings store rejected a read or write.
    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// An external command failed.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// A precondition was not met.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),

    /// Generic element error with message.
    #[error("{0}")]
    Other(String),
}

impl ElementError {
    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type for element operations.
pub type ElementResult<T> = Result<T, ElementError>;

/// Result type for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_error_displays_context() {
        let err = ElementError::command_failed("chpasswd", 1, "user unknown");
        let msg = err.to_string();
        assert!(msg.contains("chpasswd"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("user unknown"));
    }

    #[test]
    fn transaction_error_chains_context() {
        let element_err = ElementError::precondition_failed("store file unreadable");
        let tx_err =
            TransactionError::commit_failed("Updating security configuration", "Set password", element_err);

        let msg = tx_err.to_string();
        assert!(msg.contains("Updating security configuration"));
        assert!(msg.contains("Set password"));
    }

    #[test]
    fn prepare_failed_lists_every_failure() {
        let err = TransactionError::prepare_failed(
            "Update",
            vec![
                PrepareFailure {
                    element: "A".into(),
                    reason: "first".into(),
                },
                PrepareFailure {
                    element: "B".into(),
                    reason: "second".into(),
                },
            ],
        );
        let msg = err.to_string();
        assert!(msg.contains("first"));
        assert!(msg.contains("second"));
    }
}

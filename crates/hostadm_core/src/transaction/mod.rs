//! Transactional application of settings changes.
//!
//! A merge turns into a [`Transaction`]: an ordered list of named
//! [`TransactionElement`]s, each split into a side-effect-free prepare
//! phase and a durable commit phase. Prepare always runs and doubles as
//! the dry-run preview; commit runs only when the host allows it.
//!
//! There is no rollback: a commit failure stops the run and reports the
//! failing element, and elements that already committed stay applied.
//!
//! # Example
//!
//! ```ignore
//! use hostadm_core::transaction::Transaction;
//!
//! let mut tx = Transaction::new("Updating security configuration");
//! tx.append(ssh.transaction(new_settings));
//! tx.add_element(SetPassword::new("admin", secret, setter));
//!
//! let preview = tx.prepare()?;
//! if !dry_run {
//!     tx.commit()?;
//! }
//! ```

mod element;
mod engine;
mod errors;

pub use element::TransactionElement;
pub use engine::{Preview, Transaction, TxState};
pub use errors::{
    ElementError, ElementResult, PrepareFailure, TransactionError, TransactionResult,
};

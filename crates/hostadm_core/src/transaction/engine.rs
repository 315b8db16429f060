//! Transaction engine that prepares and commits elements in sequence.

use std::fmt;

use tracing::{debug, info};

use super::element::TransactionElement;
use super::errors::{PrepareFailure, TransactionError, TransactionResult};

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// Elements assembled, nothing checked yet.
    Built,
    /// Every element passed its prepare phase.
    Prepared,
    /// Every element committed. Terminal.
    Committed,
    /// A commit-phase element failed. Terminal.
    Failed,
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Built => "built",
            Self::Prepared => "prepared",
            Self::Committed => "committed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// An ordered sequence of elements applied as one unit.
///
/// The engine is oblivious to dry-run mode: the caller decides whether
/// to stop after `prepare` or to go on and `commit`. There is no
/// rollback; elements that committed before a failure stay committed,
/// and the error reports exactly which element stopped the run.
pub struct Transaction {
    /// Human-readable title (for logs and error context).
    title: String,
    /// Elements to run in order.
    elements: Vec<Box<dyn TransactionElement>>,
    /// Lifecycle state.
    state: TxState,
}

impl Transaction {
    /// Create an empty transaction.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
            state: TxState::Built,
        }
    }

    /// Add an element. Resets the lifecycle to `Built`.
    pub fn add_element<E: TransactionElement + 'static>(&mut self, element: E) -> &mut Self {
        self.elements.push(Box::new(element));
        self.state = TxState::Built;
        self
    }

    /// Add an element (builder pattern).
    pub fn with_element<E: TransactionElement + 'static>(mut self, element: E) -> Self {
        self.add_element(element);
        self
    }

    /// Move another transaction's elements onto the end of this one.
    pub fn append(&mut self, other: Transaction) {
        self.elements.extend(other.elements);
        self.state = TxState::Built;
    }

    /// Get the transaction title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the current lifecycle state.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether the transaction has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get element titles in order.
    pub fn element_titles(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.title()).collect()
    }

    /// Run every element's prepare phase and assemble a preview.
    ///
    /// Repeatable: may run again after success or failure. Failures are
    /// collected across all elements before reporting, so one bad
    /// element does not mask another. On failure the transaction stays
    /// `Built`.
    pub fn prepare(&mut self) -> TransactionResult<Preview> {
        if matches!(self.state, TxState::Committed | TxState::Failed) {
            return Err(TransactionError::finished(
                &self.title,
                self.state.to_string(),
            ));
        }

        let mut failures = Vec::new();
        let mut actions = Vec::new();

        for element in &self.elements {
            debug!(transaction = %self.title, element = element.title(), "preparing");
            match element.prepare() {
                Ok(()) => actions.push(element.title().to_string()),
                Err(e) => failures.push(PrepareFailure {
                    element: element.title().to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            return Err(TransactionError::prepare_failed(&self.title, failures));
        }

        self.state = TxState::Prepared;
        Ok(Preview {
            transaction: self.title.clone(),
            actions,
        })
    }

    /// Commit every element in declaration order.
    ///
    /// Requires a successful `prepare`. Stops at the first failing
    /// element; earlier elements stay committed and the transaction
    /// moves to `Failed`.
    pub fn commit(&mut self) -> TransactionResult<()> {
        match self.state {
            TxState::Prepared => {}
            TxState::Built => return Err(TransactionError::not_prepared(&self.title)),
            TxState::Committed | TxState::Failed => {
                return Err(TransactionError::finished(
                    &self.title,
                    self.state.to_string(),
                ));
            }
        }

        for element in &mut self.elements {
            let title = element.title().to_string();
            debug!(transaction = %self.title, element = %title, "committing");
            if let Err(e) = element.commit() {
                self.state = TxState::Failed;
                return Err(TransactionError::commit_failed(&self.title, title, e));
            }
        }

        self.state = TxState::Committed;
        info!(transaction = %self.title, elements = self.elements.len(), "committed");
        Ok(())
    }
}

/// Planned actions assembled by a successful prepare.
#[derive(Debug, Clone)]
pub struct Preview {
    transaction: String,
    actions: Vec<String>,
}

impl Preview {
    /// Title of the transaction this preview belongs to.
    pub fn transaction(&self) -> &str {
        &self.transaction
    }

    /// Planned action titles in commit order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Check whether nothing would be done.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.transaction)?;
        for (i, action) in self.actions.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, action)?;
        }
        Ok(())
    }
}

//! Transaction element trait definition.
//!
//! All commit steps implement this trait, providing a consistent
//! interface for readiness checks and durable mutation.

use super::errors::ElementResult;

/// A discrete, named unit of work inside a transaction.
///
/// The engine calls these methods in order:
///
/// 1. `prepare` - side-effect-free readiness check, run for every
///    element even when the merge is a dry run
/// 2. `commit` - the durable mutation, run only on a live merge
///
/// Elements own everything they need to commit, captured at
/// construction time; nothing is resolved late.
///
/// # Example
///
/// ```ignore
/// struct ReloadService {
///     unit: String,
/// }
///
/// impl TransactionElement for ReloadService {
///     fn title(&self) -> &str {
///         "Reload service"
///     }
///
///     fn prepare(&self) -> ElementResult<()> {
///         if self.unit.is_empty() {
///             return Err(ElementError::precondition_failed("No unit name"));
///         }
///         Ok(())
///     }
///
///     fn commit(&mut self) -> ElementResult<()> {
///         // Run systemctl reload...
///         Ok(())
///     }
/// }
/// ```
pub trait TransactionElement {
    /// Element title (for previews, logging, and error context).
    fn title(&self) -> &str;

    /// Check readiness without touching durable state.
    ///
    /// May run any number of times; must be repeatable and free of
    /// side effects. Return `Err` to veto the transaction before any
    /// element commits.
    fn prepare(&self) -> ElementResult<()>;

    /// Perform the element's durable work.
    fn commit(&mut self) -> ElementResult<()>;
}

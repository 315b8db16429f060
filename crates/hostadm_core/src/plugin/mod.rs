//! Page controller contract and session harness.
//!
//! A page is the unit of integration: it declares a model, binds
//! validators to keys, describes its widgets, and reacts to edits and
//! merges. The hosting process discovers pages, orders them by rank,
//! and drives each open page through a [`PageSession`].
//!
//! Everything runs single-threaded and cooperatively with the host's
//! input loop; a merge completes before the next edit is accepted.
//! Known gap: there is no cross-page lock, so two concurrently open
//! pages that commit overlapping keys can clobber each other.
//!
//! # Flow
//!
//! ```text
//! PageSession::open ── plugin.model() / validators() / layout()
//!     │
//!     ├─ update(edits) ── validate ─ record pending ─ plugin.on_change(pending)
//!     │      (repeat per interaction)
//!     │
//!     └─ merge() ── minimal delta ─ revalidate ─ plugin.on_merge(effective)
//!                        └─ page builds + prepares a Transaction,
//!                           commits via the host's DryRunSwitch
//! ```

mod dry_run;
mod errors;
mod session;
mod widgets;

pub use dry_run::DryRunSwitch;
pub use errors::{PluginError, PluginResult};
pub use session::{MergeSummary, PageSession};
pub use widgets::{LayoutEntry, PageLayout, Widget};

use crate::model::{ChangeSet, Model};
use crate::valid::ValidatorMap;

/// Contract every configuration page implements.
///
/// `model`, `validators`, and `layout` are pure declarations the host
/// may call freely and repeatedly; `on_change` and `on_merge` are the
/// two reactive entry points.
pub trait Plugin {
    /// Page name shown to the operator.
    fn name(&self) -> &str;

    /// Ordering rank among sibling pages. Lower ranks list first.
    fn rank(&self) -> u32;

    /// Produce a fresh model snapshot from the backing store.
    ///
    /// Must be free of side effects: two calls with an unchanged store
    /// yield equal snapshots.
    fn model(&self) -> PluginResult<Model>;

    /// Validation rules for this page's keys.
    ///
    /// Keys without a rule are accepted as-is; binding is a page
    /// decision.
    fn validators(&self) -> ValidatorMap;

    /// Widget descriptors bound to model keys.
    fn layout(&self) -> PageLayout;

    /// React to the accumulated pending edits.
    ///
    /// Runs after each validated edit, while the form may still be
    /// half filled in. Return [`PluginError::InvalidData`] only when
    /// the visible edit is already internally inconsistent; fields the
    /// user has not touched yet must not trigger rejections.
    fn on_change(&mut self, pending: &ChangeSet) -> PluginResult<()>;

    /// Apply the effective change set.
    ///
    /// The authoritative path: recompute the merged state, re-check
    /// cross-field invariants strictly (this method cannot assume
    /// `on_change` ever ran), build a transaction scoped to the keys
    /// that changed, prepare it unconditionally, and commit through
    /// the host's dry-run switch.
    fn on_merge(&mut self, effective: &ChangeSet) -> PluginResult<()>;
}

impl<P: Plugin + ?Sized> Plugin for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rank(&self) -> u32 {
        (**self).rank()
    }

    fn model(&self) -> PluginResult<Model> {
        (**self).model()
    }

    fn validators(&self) -> ValidatorMap {
        (**self).validators()
    }

    fn layout(&self) -> PageLayout {
        (**self).layout()
    }

    fn on_change(&mut self, pending: &ChangeSet) -> PluginResult<()> {
        (**self).on_change(pending)
    }

    fn on_merge(&mut self, effective: &ChangeSet) -> PluginResult<()> {
        (**self).on_merge(effective)
    }
}

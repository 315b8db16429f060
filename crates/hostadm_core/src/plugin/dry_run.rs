//! Host-owned dry-run switch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::transaction::TransactionResult;

/// Shared flag deciding whether merges commit or stop at the preview.
///
/// The hosting process owns the switch and hands clones to every page.
/// Pages consult it only through [`dry_or`](DryRunSwitch::dry_or), so
/// the commit-or-skip decision lives in exactly one place.
#[derive(Clone, Default)]
pub struct DryRunSwitch {
    flag: Arc<AtomicBool>,
}

impl DryRunSwitch {
    /// Create a switch. `true` starts in dry-run mode.
    pub fn new(dry: bool) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(dry)),
        }
    }

    /// Check whether dry-run mode is active.
    pub fn is_dry(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Flip the mode. Reserved for the hosting process.
    pub fn set(&self, dry: bool) {
        self.flag.store(dry, Ordering::SeqCst);
    }

    /// Run `action` only when dry-run mode is off.
    ///
    /// Returns `Ok(None)` without invoking the action when dry.
    pub fn dry_or<T>(
        &self,
        action: impl FnOnce() -> TransactionResult<T>,
    ) -> TransactionResult<Option<T>> {
        if self.is_dry() {
            info!("dry run active, skipping commit");
            Ok(None)
        } else {
            action().map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let switch = DryRunSwitch::new(false);
        let held_by_page = switch.clone();

        assert!(!held_by_page.is_dry());
        switch.set(true);
        assert!(held_by_page.is_dry());
    }

    #[test]
    fn dry_or_skips_the_action_when_dry() {
        let switch = DryRunSwitch::new(true);
        let mut ran = false;

        let outcome = switch
            .dry_or(|| {
                ran = true;
                Ok(())
            })
            .unwrap();

        assert!(!ran);
        assert_eq!(outcome, None);
    }

    #[test]
    fn dry_or_runs_the_action_when_live() {
        let switch = DryRunSwitch::new(false);

        let outcome = switch.dry_or(|| Ok(7)).unwrap();
        assert_eq!(outcome, Some(7));
    }
}

//! Session harness that drives one open page through the edit/merge
//! cycle.

use tracing::{debug, info};

use crate::model::{ChangeSet, ChangeTracker, Model, Value};
use crate::valid::ValidatorMap;

use super::dry_run::DryRunSwitch;
use super::errors::PluginResult;
use super::widgets::PageLayout;
use super::Plugin;

/// Outcome of a merge, for host reporting.
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// Page that merged.
    pub page: String,
    /// Keys whose values actually moved.
    pub changed_keys: Vec<String>,
    /// Whether the merge stopped at the preview.
    pub dry_run: bool,
}

/// Drives one open page: accumulates edits, validates them, and runs
/// the merge cycle.
///
/// All session state is explicit: the model snapshot taken at open,
/// the page's declared layout and validators, and the pending edits.
/// The page itself stays focused on its domain logic.
pub struct PageSession<P: Plugin> {
    plugin: P,
    model: Model,
    layout: PageLayout,
    validators: ValidatorMap,
    pending: ChangeSet,
    dry_run: DryRunSwitch,
}

impl<P: Plugin> PageSession<P> {
    /// Open a page: snapshot its model and capture its declarations.
    pub fn open(plugin: P, dry_run: DryRunSwitch) -> PluginResult<Self> {
        let model = plugin.model()?;
        let layout = plugin.layout();
        let validators = plugin.validators();
        debug!(page = plugin.name(), keys = model.len(), "page opened");
        Ok(Self {
            plugin,
            model,
            layout,
            validators,
            pending: ChangeSet::new(),
            dry_run,
        })
    }

    /// The page under session control.
    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    /// The model snapshot taken at open (or after the last live merge).
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The page's widget layout.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Edits recorded so far.
    pub fn pending(&self) -> &ChangeSet {
        &self.pending
    }

    /// Tracker over the current model and pending edits (for display).
    pub fn tracker(&self) -> ChangeTracker {
        ChangeTracker::new(self.model.clone(), self.pending.clone())
    }

    /// Record a single edit.
    pub fn edit(&mut self, key: impl Into<String>, value: impl Into<Value>) -> PluginResult<()> {
        self.update(ChangeSet::new().with(key, value))
    }

    /// Record a batch of edits.
    ///
    /// Every incoming key is validated first; one failure rejects the
    /// whole batch untouched. Accepted edits are normalized, recorded,
    /// and the full pending set goes to the page's `on_change`. A
    /// rejection from `on_change` is surfaced but the edits stay
    /// pending, the way a form keeps showing what was typed.
    pub fn update(&mut self, changes: ChangeSet) -> PluginResult<()> {
        let normalized = self.validators.check_changes(&changes)?;
        self.pending.merge_from(&normalized);
        debug!(
            page = self.plugin.name(),
            pending = self.pending.len(),
            "edits recorded"
        );
        self.plugin.on_change(&self.pending)
    }

    /// Drop all pending edits.
    pub fn discard(&mut self) {
        self.pending.clear();
    }

    /// Merge pending edits into the backing store.
    ///
    /// Computes the minimal effective change set, re-validates it, and
    /// hands it to the page's `on_merge`. After a live merge the model
    /// is re-read and pending edits are cleared; a dry run keeps both
    /// so editing can continue.
    pub fn merge(&mut self) -> PluginResult<MergeSummary> {
        let tracker = ChangeTracker::new(self.model.clone(), self.pending.clone());
        let effective = self.validators.check_changes(&tracker.effective_changes())?;

        let changed_keys: Vec<String> = effective.keys().map(str::to_string).collect();
        info!(
            page = self.plugin.name(),
            changed = changed_keys.len(),
            dry_run = self.dry_run.is_dry(),
            "merging"
        );

        self.plugin.on_merge(&effective)?;

        if !self.dry_run.is_dry() {
            self.model = self.plugin.model()?;
            self.pending.clear();
        }

        Ok(MergeSummary {
            page: self.plugin.name().to_string(),
            changed_keys,
            dry_run: self.dry_run.is_dry(),
        })
    }
}

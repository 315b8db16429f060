//! Change queries over a baseline snapshot plus a set of edits.

use super::changes::ChangeSet;
use super::snapshot::Model;
use super::value::Value;

/// Answers "what actually changed" questions for a page.
///
/// A key counts as changed only when it carries an edit whose value
/// differs from the baseline. Edits that restate the baseline are
/// ignored, so a merge touches exactly the settings whose values moved.
/// Keys absent from both sides resolve to [`Value::Empty`], never to an
/// absence error.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    baseline: Model,
    changes: ChangeSet,
}

impl ChangeTracker {
    /// Create a tracker over a baseline snapshot and a set of edits.
    ///
    /// The baseline is never mutated.
    pub fn new(baseline: Model, changes: ChangeSet) -> Self {
        Self { baseline, changes }
    }

    /// The baseline snapshot.
    pub fn baseline(&self) -> &Model {
        &self.baseline
    }

    /// The raw edits, including ones that restate the baseline.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Check whether a key's value actually moved.
    pub fn is_changed(&self, key: &str) -> bool {
        match self.changes.get(key) {
            Some(value) => self.baseline.value_or_empty(key) != *value,
            None => false,
        }
    }

    /// Check whether any of the given keys changed.
    pub fn any_changed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_changed(key))
    }

    /// The value a merge would see for a key: the edit if present,
    /// otherwise the baseline, otherwise the empty sentinel.
    pub fn effective_value(&self, key: &str) -> Value {
        match self.changes.get(key) {
            Some(value) => value.clone(),
            None => self.baseline.value_or_empty(key),
        }
    }

    /// Effective values for several keys, in the order given.
    pub fn effective_values(&self, keys: &[&str]) -> Vec<Value> {
        keys.iter().map(|key| self.effective_value(key)).collect()
    }

    /// Keys whose values actually moved, in sorted order.
    pub fn changed_keys(&self) -> Vec<&str> {
        self.changes
            .keys()
            .filter(|key| self.is_changed(key))
            .collect()
    }

    /// The minimal set of edits that moves the baseline to the merged
    /// state.
    pub fn effective_changes(&self) -> ChangeSet {
        self.changes
            .iter()
            .filter(|(key, _)| self.is_changed(key))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// The merged snapshot: baseline with every edit applied.
    pub fn effective_model(&self) -> Model {
        self.baseline.overlay(&self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Model {
        Model::new()
            .with("ssh.pwauth", false)
            .with("rng.aesni", true)
            .with("rng.bytes", "512")
    }

    #[test]
    fn effective_values_prefer_edits_and_leave_baseline_alone() {
        let base = baseline();
        let changes = ChangeSet::new().with("rng.bytes", "1024");
        let tracker = ChangeTracker::new(base.clone(), changes);

        let values = tracker.effective_values(&["ssh.pwauth", "rng.bytes"]);
        assert_eq!(values, vec![Value::Bool(false), Value::text("1024")]);
        assert_eq!(tracker.baseline(), &base);
    }

    #[test]
    fn any_changed_is_false_for_disjoint_keys() {
        let changes = ChangeSet::new().with("rng.bytes", "1024");
        let tracker = ChangeTracker::new(baseline(), changes);

        assert!(tracker.any_changed(&["rng.bytes", "rng.aesni"]));
        assert!(!tracker.any_changed(&["ssh.pwauth", "rng.aesni"]));
    }

    #[test]
    fn restating_the_baseline_is_not_a_change() {
        let changes = ChangeSet::new()
            .with("rng.bytes", "512")
            .with("ssh.pwauth", true);
        let tracker = ChangeTracker::new(baseline(), changes);

        assert!(!tracker.is_changed("rng.bytes"));
        assert!(tracker.is_changed("ssh.pwauth"));
        assert_eq!(tracker.changed_keys(), vec!["ssh.pwauth"]);

        let effective = tracker.effective_changes();
        assert_eq!(effective.len(), 1);
        assert_eq!(effective.get("ssh.pwauth"), Some(&Value::Bool(true)));
    }

    #[test]
    fn missing_keys_resolve_to_empty() {
        let tracker = ChangeTracker::new(Model::new(), ChangeSet::new());
        assert_eq!(tracker.effective_value("no.such.key"), Value::Empty);
        assert!(!tracker.is_changed("no.such.key"));
    }

    #[test]
    fn empty_edit_over_missing_key_is_not_a_change() {
        let changes = ChangeSet::new().with("extra", Value::Empty);
        let tracker = ChangeTracker::new(Model::new(), changes);
        assert!(!tracker.is_changed("extra"));
        assert!(tracker.effective_changes().is_empty());
    }

    #[test]
    fn effective_model_overlays_all_edits() {
        let changes = ChangeSet::new()
            .with("ssh.pwauth", true)
            .with("new.key", "x");
        let tracker = ChangeTracker::new(baseline(), changes);

        let merged = tracker.effective_model();
        assert_eq!(merged.get("ssh.pwauth"), Some(&Value::Bool(true)));
        assert_eq!(merged.get("rng.bytes"), Some(&Value::text("512")));
        assert_eq!(merged.get("new.key"), Some(&Value::text("x")));
    }
}

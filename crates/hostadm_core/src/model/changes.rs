//! Proposed edits keyed by model key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// An ordered set of proposed key/value edits.
///
/// The same shape serves two roles: the pending set accumulated while a
/// page is being edited (possibly incomplete or inconsistent), and the
/// effective set a merge actually applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    entries: BTreeMap<String, Value>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edit (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Record an edit. A later edit to the same key replaces the earlier one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get the proposed value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Check whether a key has a proposed edit.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over edited keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over edits in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of edits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether there are no edits.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all edits.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fold another set of edits into this one. The other set wins on
    /// overlapping keys.
    pub fn merge_from(&mut self, other: &ChangeSet) {
        for (key, value) in other.iter() {
            self.entries.insert(key.to_string(), value.clone());
        }
    }
}

impl FromIterator<(String, Value)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_edit_replaces_earlier() {
        let mut changes = ChangeSet::new();
        changes.set("rng.bytes", "256");
        changes.set("rng.bytes", "512");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("rng.bytes"), Some(&Value::text("512")));
    }

    #[test]
    fn merge_from_prefers_incoming() {
        let mut pending = ChangeSet::new().with("a", "1").with("b", "2");
        let incoming = ChangeSet::new().with("b", "3").with("c", "4");

        pending.merge_from(&incoming);

        assert_eq!(pending.get("a"), Some(&Value::text("1")));
        assert_eq!(pending.get("b"), Some(&Value::text("3")));
        assert_eq!(pending.get("c"), Some(&Value::text("4")));
    }

    #[test]
    fn keys_iterate_sorted() {
        let changes = ChangeSet::new().with("z", "1").with("a", "2");
        let keys: Vec<&str> = changes.keys().collect();
        assert_eq!(keys, vec!["a", "z"]);
    }
}

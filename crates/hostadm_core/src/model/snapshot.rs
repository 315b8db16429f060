//! Point-in-time snapshot of a page's model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::changes::ChangeSet;
use super::value::Value;

/// Snapshot of model keys and their current values.
///
/// A page produces a fresh `Model` from its backing store every time it
/// is opened, and again after a successful merge. Snapshots are never
/// edited in place; laying a change set over one yields a new snapshot
/// via [`overlay`](Model::overlay).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model {
    entries: BTreeMap<String, Value>,
}

impl Model {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get the value for a key, or the empty sentinel when absent.
    pub fn value_or_empty(&self, key: &str) -> Value {
        self.entries.get(key).cloned().unwrap_or(Value::Empty)
    }

    /// Check whether a key exists in the snapshot.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the snapshot has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce a new snapshot with `changes` laid over this one.
    ///
    /// The receiver is left untouched.
    pub fn overlay(&self, changes: &ChangeSet) -> Model {
        let mut merged = self.clone();
        for (key, value) in changes.iter() {
            merged.entries.insert(key.to_string(), value.clone());
        }
        merged
    }
}

impl FromIterator<(String, Value)> for Model {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

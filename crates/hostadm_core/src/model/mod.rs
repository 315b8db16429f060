//! Data model primitives: field values, snapshots, change sets, and
//! change queries.
//!
//! A page declares its state as a flat map of dotted keys
//! (`"ssh.pwauth"`) to loosely typed [`Value`]s. The [`Model`] is a
//! point-in-time snapshot of that map, the [`ChangeSet`] is a set of
//! proposed edits against it, and the [`ChangeTracker`] answers "what
//! actually changed" questions when the two are combined.

mod changes;
mod snapshot;
mod tracker;
mod value;

pub use changes::ChangeSet;
pub use snapshot::Model;
pub use tracker::ChangeTracker;
pub use value::Value;

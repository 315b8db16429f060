//! Persistent host settings: the TOML-backed store and its groups.
//!
//! [`SettingsStore`] owns the file format (atomic writes, section-level
//! rewrites); the per-concern groups ([`SshConfig`], [`SyslogConfig`])
//! and the password helper are the collaborators pages actually talk
//! to. Groups read with `retrieve()` and persist through transaction
//! elements, never by mutating the file directly.

mod groups;
mod manager;
mod passwd;
mod settings;

pub use groups::{SshConfig, SyslogConfig, WriteSection};
pub use manager::{SettingsStore, StoreError, StoreResult};
pub use passwd::{PasswordSetter, SetPassword, SystemPasswd};
pub use settings::{HostSettings, Section, SshSettings, SyslogSettings};

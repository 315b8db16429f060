//! Settings structs with TOML-based sections.
//!
//! Settings are organized into sections that map to TOML tables. Each
//! section can be written independently for atomic section-level
//! updates.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all host configuration sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSettings {
    /// SSH daemon settings.
    #[serde(default)]
    pub ssh: SshSettings,

    /// Remote syslog forwarding settings.
    #[serde(default)]
    pub syslog: SyslogSettings,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            ssh: SshSettings::default(),
            syslog: SyslogSettings::default(),
        }
    }
}

/// SSH daemon settings, including the strong number generator knobs the
/// daemon feeds from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshSettings {
    /// Allow password authentication.
    #[serde(default)]
    pub pwauth: bool,

    /// Use the AES-NI instruction set for the strong number generator.
    #[serde(default = "default_true")]
    pub aesni: bool,

    /// Bytes consumed per generator round. `None` keeps the daemon
    /// default.
    #[serde(default)]
    pub num_bytes: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            pwauth: false,
            aesni: default_true(),
            num_bytes: None,
        }
    }
}

/// Remote syslog forwarding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyslogSettings {
    /// Destination host. Empty disables forwarding.
    #[serde(default)]
    pub address: String,

    /// Destination port. `None` keeps the listener default.
    #[serde(default)]
    pub port: Option<u64>,
}

impl Default for SyslogSettings {
    fn default() -> Self {
        Self {
            address: String::new(),
            port: None,
        }
    }
}

/// Identifies a settings section for section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Ssh,
    Syslog,
}

impl Section {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            Section::Ssh => "ssh",
            Section::Syslog => "syslog",
        }
    }
}

//! Settings groups: the store-facing collaborators pages talk to.
//!
//! Each group owns one logical slice of the settings file and exposes
//! the two operations the page contract needs: `retrieve()` for a
//! point-in-time snapshot and `transaction()` for ready-to-run commit
//! elements.

use std::path::PathBuf;

use tracing::debug;

use crate::transaction::{ElementError, ElementResult, Transaction, TransactionElement};

use super::manager::{SettingsStore, StoreResult};
use super::settings::{HostSettings, Section, SshSettings, SyslogSettings};

/// SSH settings group.
#[derive(Debug, Clone)]
pub struct SshConfig {
    store_path: PathBuf,
}

impl SshConfig {
    /// Create a group over the given settings file.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Read the current SSH settings.
    ///
    /// A missing file yields defaults; the file is never created or
    /// modified here.
    pub fn retrieve(&self) -> StoreResult<SshSettings> {
        let mut store = SettingsStore::new(&self.store_path);
        store.load_if_exists()?;
        Ok(store.settings().ssh.clone())
    }

    /// Build the transaction that persists `new` settings.
    pub fn transaction(&self, new: SshSettings) -> Transaction {
        Transaction::new("Update SSH settings").with_element(WriteSection::new(
            &self.store_path,
            Section::Ssh,
            HostSettings {
                ssh: new,
                ..HostSettings::default()
            },
        ))
    }
}

/// Remote syslog settings group.
#[derive(Debug, Clone)]
pub struct SyslogConfig {
    store_path: PathBuf,
}

impl SyslogConfig {
    /// Create a group over the given settings file.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Read the current syslog settings.
    ///
    /// A missing file yields defaults; the file is never created or
    /// modified here.
    pub fn retrieve(&self) -> StoreResult<SyslogSettings> {
        let mut store = SettingsStore::new(&self.store_path);
        store.load_if_exists()?;
        Ok(store.settings().syslog.clone())
    }

    /// Build the transaction that persists `new` settings.
    pub fn transaction(&self, new: SyslogSettings) -> Transaction {
        Transaction::new("Update remote syslog settings").with_element(WriteSection::new(
            &self.store_path,
            Section::Syslog,
            HostSettings {
                syslog: new,
                ..HostSettings::default()
            },
        ))
    }
}

/// Transaction element that rewrites one settings section atomically.
///
/// Prepare proves the settings file is usable (parseable if present)
/// without writing anything; commit performs the section-scoped
/// rewrite, leaving the other sections as they are on disk.
pub struct WriteSection {
    title: String,
    store_path: PathBuf,
    section: Section,
    settings: HostSettings,
}

impl WriteSection {
    /// Capture everything needed to write `section` out of `settings`.
    pub fn new(store_path: impl Into<PathBuf>, section: Section, settings: HostSettings) -> Self {
        Self {
            title: format!("Write [{}] settings", section.table_name()),
            store_path: store_path.into(),
            section,
            settings,
        }
    }
}

impl TransactionElement for WriteSection {
    fn title(&self) -> &str {
        &self.title
    }

    fn prepare(&self) -> ElementResult<()> {
        let mut store = SettingsStore::new(&self.store_path);
        if let Err(e) = store.load_if_exists() {
            return Err(ElementError::precondition_failed(format!(
                "settings file {} is unusable: {}",
                self.store_path.display(),
                e
            )));
        }
        debug!(
            section = self.section.table_name(),
            path = %self.store_path.display(),
            "section write ready"
        );
        Ok(())
    }

    fn commit(&mut self) -> ElementResult<()> {
        let mut store = SettingsStore::new(&self.store_path);
        *store.settings_mut() = self.settings.clone();
        store.update_section(self.section)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn retrieve_defaults_when_file_missing() {
        let dir = tempdir().unwrap();
        let ssh = SshConfig::new(dir.path().join("settings.toml"));

        let settings = ssh.retrieve().unwrap();
        assert_eq!(settings, SshSettings::default());
        // Retrieval never creates the file.
        assert!(!dir.path().join("settings.toml").exists());
    }

    #[test]
    fn prepare_leaves_store_untouched_commit_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let ssh = SshConfig::new(&path);

        let mut tx = ssh.transaction(SshSettings {
            pwauth: true,
            ..SshSettings::default()
        });

        let preview = tx.prepare().unwrap();
        assert_eq!(preview.actions(), ["Write [ssh] settings"]);
        assert!(!path.exists());

        tx.commit().unwrap();
        let written = SshConfig::new(&path).retrieve().unwrap();
        assert!(written.pwauth);
    }

    #[test]
    fn corrupt_store_file_fails_prepare() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "this is ] not toml [").unwrap();

        let element = WriteSection::new(&path, Section::Ssh, HostSettings::default());
        let err = element.prepare().unwrap_err();
        assert!(matches!(err, ElementError::PreconditionFailed(_)));
    }

    #[test]
    fn section_write_preserves_sibling_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[syslog]\naddress = \"logs.example.com\"\n").unwrap();

        let mut tx = SshConfig::new(&path).transaction(SshSettings {
            num_bytes: Some(2048),
            ..SshSettings::default()
        });
        tx.prepare().unwrap();
        tx.commit().unwrap();

        let syslog = SyslogConfig::new(&path).retrieve().unwrap();
        assert_eq!(syslog.address, "logs.example.com");
        let ssh = SshConfig::new(&path).retrieve().unwrap();
        assert_eq!(ssh.num_bytes, Some(2048));
    }

    #[test]
    fn syslog_transaction_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let syslog = SyslogConfig::new(&path);

        let mut tx = syslog.transaction(SyslogSettings {
            address: "collector.internal".to_string(),
            port: Some(6514),
        });
        tx.prepare().unwrap();
        tx.commit().unwrap();

        let written = syslog.retrieve().unwrap();
        assert_eq!(written.address, "collector.internal");
        assert_eq!(written.port, Some(6514));
    }
}

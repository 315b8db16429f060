//! Settings store for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only the modified section is changed)
//! - Preserves other sections' comments and formatting with toml_edit

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{HostSettings, Section};

/// Errors that can occur during settings store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse settings for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Manages the host settings file.
///
/// Handles loading, saving, and atomic section-level updates.
pub struct SettingsStore {
    /// Path to the settings file.
    path: PathBuf,
    /// Current settings loaded in memory.
    settings: HostSettings,
}

impl SettingsStore {
    /// Create a store over the given settings file path.
    ///
    /// Does not touch the file - call `load()`, `load_if_exists()` or
    /// `load_or_create()` after.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: HostSettings::default(),
        }
    }

    /// Get the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Note: changes made here are only in memory until `save()` or
    /// `update_section()` is called.
    pub fn settings_mut(&mut self) -> &mut HostSettings {
        &mut self.settings
    }

    /// Load settings from file.
    ///
    /// Returns an error if the file doesn't exist.
    pub fn load(&mut self) -> StoreResult<()> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load settings if the file exists; keep defaults otherwise.
    ///
    /// Never writes. Returns whether the file was present.
    pub fn load_if_exists(&mut self) -> StoreResult<bool> {
        if self.path.exists() {
            self.load()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Load settings from file, creating it with defaults if missing.
    pub fn load_or_create(&mut self) -> StoreResult<()> {
        if self.path.exists() {
            self.load()?;
        } else {
            self.settings = HostSettings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Save the entire settings file atomically.
    ///
    /// Writes to a temp file first, then renames.
    pub fn save(&self) -> StoreResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Update a specific section atomically.
    ///
    /// Re-reads the file from disk, replaces only the named table, and
    /// writes back atomically, so a stale in-memory copy of the other
    /// sections never clobbers them.
    pub fn update_section(&mut self, section: Section) -> StoreResult<()> {
        // Re-read current file from disk (get fresh state)
        let current_content = if self.path.exists() {
            fs::read_to_string(&self.path)?
        } else {
            String::new()
        };

        // Parse as editable document
        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        // Serialize just the section we want to update
        let section_toml = match section {
            Section::Ssh => toml::to_string_pretty(&self.settings.ssh)?,
            Section::Syslog => toml::to_string_pretty(&self.settings.syslog)?,
        };

        // Parse the section as a table
        let section_doc: DocumentMut = section_toml.parse()?;
        let section_table = section_doc.as_table().clone();

        // Update just that section in the document
        doc[section.table_name()] = Item::Table(section_table);

        // Write atomically
        self.atomic_write(&doc.to_string())?;

        Ok(())
    }

    /// Generate settings content with helpful comments.
    fn generate_config_with_comments(&self) -> StoreResult<String> {
        let mut output = String::new();

        output.push_str("# hostadm configuration\n");
        output.push_str("# Sections are rewritten independently; other sections keep\n");
        output.push_str("# their formatting when one is updated.\n\n");

        output.push_str("# SSH daemon and strong number generator\n");
        output.push_str("[ssh]\n");
        let ssh_content = toml::to_string_pretty(&self.settings.ssh)?;
        for line in ssh_content.lines() {
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');

        output.push_str("# Remote syslog forwarding\n");
        output.push_str("[syslog]\n");
        let syslog_content = toml::to_string_pretty(&self.settings.syslog)?;
        for line in syslog_content.lines() {
            output.push_str(line);
            output.push('\n');
        }

        Ok(output)
    }

    /// Write content to the settings file atomically.
    ///
    /// Writes to a temp file first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        // Create parent directory if needed
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file in same directory (for atomic rename)
        let temp_path = self.path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?; // Ensure data is flushed to disk
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

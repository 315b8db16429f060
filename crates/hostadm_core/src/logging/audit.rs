//! Append-only audit trail for administrative actions.
//!
//! Every apply run leaves a timestamped line in `audit.log`, whether
//! it went through, was rejected, or only previewed. The file is
//! opened in append mode so the trail survives across sessions.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

use super::types::AuditCallback;

/// Timestamped action log with file and callback output.
pub struct AuditLog {
    /// Path to the audit file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Arc<Mutex<Option<BufWriter<File>>>>,
    /// Host callback for mirroring lines.
    callback: Arc<Mutex<Option<AuditCallback>>>,
}

impl AuditLog {
    /// Open (or create) the audit trail under `log_dir`.
    ///
    /// The directory is created if missing and `audit.log` is opened
    /// for appending.
    pub fn open(
        log_dir: impl AsRef<Path>,
        callback: Option<AuditCallback>,
    ) -> std::io::Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join("audit.log");
        let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

        Ok(Self {
            log_path,
            file_writer: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
            callback: Arc::new(Mutex::new(callback)),
        })
    }

    /// Get the audit file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record a raw timestamped line.
    pub fn record(&self, message: &str) {
        let stamped = format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
        self.output(&stamped);
    }

    /// Record a merge that went through.
    pub fn applied(&self, page: &str, changed: &[String], dry_run: bool) {
        let marker = if dry_run { " [dry-run]" } else { "" };
        if changed.is_empty() {
            self.record(&format!("page '{}': nothing to change{}", page, marker));
        } else {
            self.record(&format!(
                "page '{}': applied {}{}",
                page,
                changed.join(", "),
                marker
            ));
        }
    }

    /// Record a merge that was refused.
    pub fn rejected(&self, page: &str, reason: &str) {
        self.record(&format!("page '{}': rejected ({})", page, reason));
    }

    /// Flush the audit file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the trail and release the file handle.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    /// Output a stamped line to file and callback.
    fn output(&self, stamped: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", stamped);
        }

        if let Some(ref callback) = *self.callback.lock() {
            callback(stamped);
        }
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[test]
    fn creates_audit_file() {
        let dir = tempdir().unwrap();
        let audit = AuditLog::open(dir.path(), None).unwrap();

        assert!(audit.log_path().exists());
        assert!(audit.log_path().to_string_lossy().ends_with("audit.log"));
    }

    #[test]
    fn records_timestamped_lines() {
        let dir = tempdir().unwrap();
        let audit = AuditLog::open(dir.path(), None).unwrap();

        audit.record("manual entry");
        audit.flush();

        let content = fs::read_to_string(audit.log_path()).unwrap();
        assert!(content.contains("manual entry"));
        assert!(content.starts_with('['));
    }

    #[test]
    fn appends_across_reopens() {
        let dir = tempdir().unwrap();
        let path;
        {
            let audit = AuditLog::open(dir.path(), None).unwrap();
            audit.record("first session");
            path = audit.log_path().to_path_buf();
        }
        {
            let audit = AuditLog::open(dir.path(), None).unwrap();
            audit.record("second session");
        }

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("first session"));
        assert!(content.contains("second session"));
    }

    #[test]
    fn calls_host_callback() {
        let dir = tempdir().unwrap();
        let call_count = Arc::new(AtomicUsize::new(0));
        let count_clone = call_count.clone();

        let callback: AuditCallback = Box::new(move |_line| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let audit = AuditLog::open(dir.path(), Some(callback)).unwrap();
        audit.record("one");
        audit.record("two");

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn formats_apply_outcomes() {
        let dir = tempdir().unwrap();
        let audit = AuditLog::open(dir.path(), None).unwrap();

        audit.applied("Security", &["ssh.pwauth".into()], false);
        audit.applied("Security", &[], true);
        audit.rejected("Security", "Passwords do not match.");
        audit.flush();

        let content = fs::read_to_string(audit.log_path()).unwrap();
        assert!(content.contains("page 'Security': applied ssh.pwauth"));
        assert!(content.contains("nothing to change [dry-run]"));
        assert!(content.contains("rejected (Passwords do not match.)"));
    }
}

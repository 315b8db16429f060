//! Remote syslog page: where the host forwards its logs.

use std::path::PathBuf;

use tracing::info;

use hostadm_core::model::{ChangeSet, ChangeTracker, Model, Value};
use hostadm_core::plugin::{DryRunSwitch, PageLayout, Plugin, PluginResult};
use hostadm_core::store::{SyslogConfig, SyslogSettings};
use hostadm_core::valid::{Validator, ValidatorMap};

const ADDRESS: &str = "syslog.address";
const PORT: &str = "syslog.port";

/// Page for forwarding system logs to a remote collector.
pub struct SyslogPage {
    syslog: SyslogConfig,
    dry_run: DryRunSwitch,
}

impl SyslogPage {
    pub fn new(store_path: impl Into<PathBuf>, dry_run: DryRunSwitch) -> Self {
        Self {
            syslog: SyslogConfig::new(store_path),
            dry_run,
        }
    }
}

impl Plugin for SyslogPage {
    fn name(&self) -> &str {
        "Syslog"
    }

    fn rank(&self) -> u32 {
        40
    }

    fn model(&self) -> PluginResult<Model> {
        let syslog = self.syslog.retrieve()?;
        Ok(Model::new().with(ADDRESS, syslog.address).with(
            PORT,
            match syslog.port {
                Some(port) => Value::text(port.to_string()),
                None => Value::Empty,
            },
        ))
    }

    fn validators(&self) -> ValidatorMap {
        ValidatorMap::new()
            .with(ADDRESS, Validator::Text)
            .with(PORT, Validator::number(Some(1), Some(65535)) | Validator::Empty)
    }

    fn layout(&self) -> PageLayout {
        PageLayout::new()
            .header("Remote Syslog")
            .entry(ADDRESS, "Collector address:")
            .entry(PORT, "Collector port:")
    }

    fn on_change(&mut self, _pending: &ChangeSet) -> PluginResult<()> {
        Ok(())
    }

    fn on_merge(&mut self, effective: &ChangeSet) -> PluginResult<()> {
        let tracker = ChangeTracker::new(self.model()?, effective.clone());
        if !tracker.any_changed(&[ADDRESS, PORT]) {
            return Ok(());
        }

        let values = tracker.effective_values(&[ADDRESS, PORT]);
        let settings = SyslogSettings {
            address: values[0].as_str().unwrap_or_default().to_string(),
            port: values[1].as_str().and_then(|s| s.parse().ok()),
        };

        let mut tx = self.syslog.transaction(settings);
        let preview = tx.prepare()?;
        info!(page = self.name(), actions = ?preview.actions(), "prepared");
        self.dry_run.dry_or(|| tx.commit())?;
        Ok(())
    }
}

//! Security page: remote access, random number generation and the
//! administrator password.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use hostadm_core::model::{ChangeSet, ChangeTracker, Model, Value};
use hostadm_core::plugin::{DryRunSwitch, PageLayout, Plugin, PluginError, PluginResult};
use hostadm_core::store::{PasswordSetter, SetPassword, SshConfig, SshSettings};
use hostadm_core::transaction::Transaction;
use hostadm_core::valid::{Validator, ValidatorMap};

const PWAUTH: &str = "ssh.pwauth";
const AESNI: &str = "rng.aesni";
const RNG_BYTES: &str = "rng.bytes";
const PASSWORD: &str = "passwd.admin.password";
const PASSWORD_CONFIRM: &str = "passwd.admin.password_confirmation";

const SSH_KEYS: [&str; 3] = [PWAUTH, AESNI, RNG_BYTES];
const PASSWD_KEYS: [&str; 2] = [PASSWORD, PASSWORD_CONFIRM];

/// Page covering SSH access policy, the hardware RNG and the local
/// administrator password.
pub struct SecurityPage {
    ssh: SshConfig,
    passwd: Arc<dyn PasswordSetter>,
    dry_run: DryRunSwitch,
}

impl SecurityPage {
    pub fn new(
        store_path: impl Into<PathBuf>,
        passwd: Arc<dyn PasswordSetter>,
        dry_run: DryRunSwitch,
    ) -> Self {
        Self {
            ssh: SshConfig::new(store_path),
            passwd,
            dry_run,
        }
    }
}

/// Both halves of the password pair must agree before anything runs.
fn check_password_pair(password: &Value, confirmation: &Value) -> PluginResult<()> {
    if password != confirmation {
        return Err(PluginError::invalid_data("Passwords do not match."));
    }
    Ok(())
}

impl Plugin for SecurityPage {
    fn name(&self) -> &str {
        "Security"
    }

    fn rank(&self) -> u32 {
        20
    }

    fn model(&self) -> PluginResult<Model> {
        let ssh = self.ssh.retrieve()?;
        Ok(Model::new()
            .with(PWAUTH, ssh.pwauth)
            .with(AESNI, ssh.aesni)
            .with(
                RNG_BYTES,
                match ssh.num_bytes {
                    Some(n) => Value::text(n.to_string()),
                    None => Value::Empty,
                },
            )
            // Passwords are write-only; the model never echoes them.
            .with(PASSWORD, Value::Empty)
            .with(PASSWORD_CONFIRM, Value::Empty))
    }

    fn validators(&self) -> ValidatorMap {
        ValidatorMap::new()
            .with(RNG_BYTES, Validator::number(Some(0), None) | Validator::Empty)
            .with(PASSWORD, Validator::Text)
            .with(PASSWORD_CONFIRM, Validator::Text)
    }

    fn layout(&self) -> PageLayout {
        PageLayout::new()
            .header("Remote Access")
            .checkbox(PWAUTH, "Allow password authentication over SSH")
            .header("Strong Random Number Generator")
            .checkbox(AESNI, "Use AES-NI acceleration")
            .entry(RNG_BYTES, "Bytes read per request:")
            .header("Local Access")
            .password_entry(PASSWORD, "Administrator password:")
            .password_entry(PASSWORD_CONFIRM, "Retype password:")
    }

    fn on_change(&mut self, pending: &ChangeSet) -> PluginResult<()> {
        // Judge the pair only once both halves have been typed.
        if let (Some(password), Some(confirmation)) =
            (pending.get(PASSWORD), pending.get(PASSWORD_CONFIRM))
        {
            check_password_pair(password, confirmation)?;
        }
        Ok(())
    }

    fn on_merge(&mut self, effective: &ChangeSet) -> PluginResult<()> {
        let tracker = ChangeTracker::new(self.model()?, effective.clone());
        let mut tx = Transaction::new("Updating security configuration");

        if tracker.any_changed(&SSH_KEYS) {
            let values = tracker.effective_values(&SSH_KEYS);
            let settings = SshSettings {
                pwauth: values[0].as_bool().unwrap_or(false),
                aesni: values[1].as_bool().unwrap_or(true),
                num_bytes: values[2].as_str().and_then(|s| s.parse().ok()),
            };
            tx.append(self.ssh.transaction(settings));
        }

        if tracker.any_changed(&PASSWD_KEYS) {
            let values = tracker.effective_values(&PASSWD_KEYS);
            // Authoritative re-check: a lone edit leaves the other half
            // at its empty baseline and fails here.
            check_password_pair(&values[0], &values[1])?;
            if let Some(secret) = values[0].as_str() {
                tx.add_element(SetPassword::new("admin", secret, Arc::clone(&self.passwd)));
            }
        }

        let preview = tx.prepare()?;
        info!(page = self.name(), actions = ?preview.actions(), "prepared");
        self.dry_run.dry_or(|| tx.commit())?;
        Ok(())
    }
}

//! Local account password updates.
//!
//! The actual mechanism sits behind [`PasswordSetter`] so pages and
//! tests can swap it; the shipped implementation drives `chpasswd`.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::transaction::{ElementError, ElementResult, TransactionElement};

/// Applies a password to a local account.
pub trait PasswordSetter {
    /// Set `user`'s password to `secret`.
    fn set_password(&self, user: &str, secret: &str) -> ElementResult<()>;
}

/// Password setter backed by the system `chpasswd` tool.
#[derive(Debug, Clone, Default)]
pub struct SystemPasswd;

impl PasswordSetter for SystemPasswd {
    fn set_password(&self, user: &str, secret: &str) -> ElementResult<()> {
        let mut child = Command::new("chpasswd")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ElementError::io("spawning chpasswd", e))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| ElementError::other("chpasswd stdin unavailable"))?;
            writeln!(stdin, "{}:{}", user, secret)
                .map_err(|e| ElementError::io("writing to chpasswd", e))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ElementError::io("waiting for chpasswd", e))?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ElementError::command_failed(
                "chpasswd",
                output.status.code().unwrap_or(-1),
                message,
            ));
        }

        Ok(())
    }
}

/// Transaction element that sets one account's password.
///
/// Captures the account, the secret, and the setter at construction.
/// The secret never appears in logs or previews.
pub struct SetPassword {
    title: String,
    user: String,
    secret: String,
    setter: Arc<dyn PasswordSetter>,
}

impl SetPassword {
    /// Capture the account, the new secret, and the setter to use.
    pub fn new(
        user: impl Into<String>,
        secret: impl Into<String>,
        setter: Arc<dyn PasswordSetter>,
    ) -> Self {
        let user = user.into();
        Self {
            title: format!("Set password for {}", user),
            user,
            secret: secret.into(),
            setter,
        }
    }
}

impl TransactionElement for SetPassword {
    fn title(&self) -> &str {
        &self.title
    }

    fn prepare(&self) -> ElementResult<()> {
        if self.user.is_empty() {
            return Err(ElementError::precondition_failed("no account name"));
        }
        if self.secret.is_empty() {
            return Err(ElementError::precondition_failed(
                "refusing to set an empty password",
            ));
        }
        debug!(user = %self.user, "password change ready");
        Ok(())
    }

    fn commit(&mut self) -> ElementResult<()> {
        self.setter.set_password(&self.user, &self.secret)
    }
}

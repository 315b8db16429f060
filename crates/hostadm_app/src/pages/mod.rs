//! Built-in administration pages.

mod security;
mod syslog;

pub use security::SecurityPage;
pub use syslog::SyslogPage;

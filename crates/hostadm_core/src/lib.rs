//! hostadm core - Backend logic for the host administration tool
//!
//! This crate contains all change tracking, validation and transaction
//! logic with zero UI dependencies. It can be used by the interactive
//! front end or a CLI tool.

pub mod logging;
pub mod model;
pub mod plugin;
pub mod store;
pub mod transaction;
pub mod valid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}

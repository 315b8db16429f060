//! Page registry: the ordered set of administration pages.

use std::path::PathBuf;
use std::sync::Arc;

use hostadm_core::plugin::{DryRunSwitch, Plugin};
use hostadm_core::store::PasswordSetter;

use crate::pages::{SecurityPage, SyslogPage};

/// Ordered collection of administration pages.
///
/// Pages are kept sorted by rank, then name, so menus and `list`
/// output stay stable no matter the registration order.
#[derive(Default)]
pub struct PageRegistry {
    pages: Vec<Box<dyn Plugin>>,
}

impl PageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page, keeping rank order.
    pub fn register(&mut self, page: Box<dyn Plugin>) {
        self.pages.push(page);
        self.pages
            .sort_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| a.name().cmp(b.name())));
    }

    /// All registered pages, in rank order.
    pub fn pages(&self) -> &[Box<dyn Plugin>] {
        &self.pages
    }

    /// Page names, in rank order.
    pub fn names(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.name()).collect()
    }

    /// Look up a page by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&dyn Plugin> {
        self.pages
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .map(|p| p.as_ref())
    }

    /// Take a page out of the registry so a session can own it.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Plugin>> {
        let index = self
            .pages
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))?;
        Some(self.pages.remove(index))
    }
}

/// Assemble the standard pages over one settings store.
pub fn standard_pages(
    store_path: impl Into<PathBuf>,
    passwd: Arc<dyn PasswordSetter>,
    dry_run: DryRunSwitch,
) -> PageRegistry {
    let store_path = store_path.into();

    let mut registry = PageRegistry::new();
    registry.register(Box::new(SecurityPage::new(
        &store_path,
        passwd,
        dry_run.clone(),
    )));
    registry.register(Box::new(SyslogPage::new(&store_path, dry_run)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostadm_core::model::{ChangeSet, Model};
    use hostadm_core::plugin::{PageLayout, PluginResult};
    use hostadm_core::store::SystemPasswd;
    use hostadm_core::valid::ValidatorMap;
    use tempfile::tempdir;

    struct StubPage {
        name: &'static str,
        rank: u32,
    }

    impl Plugin for StubPage {
        fn name(&self) -> &str {
            self.name
        }

        fn rank(&self) -> u32 {
            self.rank
        }

        fn model(&self) -> PluginResult<Model> {
            Ok(Model::new())
        }

        fn validators(&self) -> ValidatorMap {
            ValidatorMap::new()
        }

        fn layout(&self) -> PageLayout {
            PageLayout::new()
        }

        fn on_change(&mut self, _pending: &ChangeSet) -> PluginResult<()> {
            Ok(())
        }

        fn on_merge(&mut self, _effective: &ChangeSet) -> PluginResult<()> {
            Ok(())
        }
    }

    #[test]
    fn pages_sort_by_rank_then_name() {
        let mut registry = PageRegistry::new();
        registry.register(Box::new(StubPage { name: "Zeta", rank: 30 }));
        registry.register(Box::new(StubPage { name: "Beta", rank: 10 }));
        registry.register(Box::new(StubPage { name: "Alpha", rank: 30 }));

        assert_eq!(registry.names(), vec!["Beta", "Alpha", "Zeta"]);
    }

    #[test]
    fn find_ignores_case() {
        let mut registry = PageRegistry::new();
        registry.register(Box::new(StubPage { name: "Security", rank: 20 }));

        assert!(registry.find("security").is_some());
        assert!(registry.find("SECURITY").is_some());
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn remove_hands_over_the_page() {
        let mut registry = PageRegistry::new();
        registry.register(Box::new(StubPage { name: "Security", rank: 20 }));

        let page = registry.remove("security").unwrap();
        assert_eq!(page.name(), "Security");
        assert!(registry.pages().is_empty());
    }

    #[test]
    fn standard_pages_cover_the_expected_set() {
        let dir = tempdir().unwrap();
        let registry = standard_pages(
            dir.path().join("settings.toml"),
            Arc::new(SystemPasswd),
            DryRunSwitch::new(true),
        );

        assert_eq!(registry.names(), vec!["Security", "Syslog"]);
    }
}

//! Declarative widget descriptors for page layouts.
//!
//! The core never renders anything. A page describes its surface as an
//! ordered list of labeled slots bound to model keys; the hosting
//! toolkit decides what a checkbox or a password entry looks like.

/// A labeled widget slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Section heading. Never bound to a key.
    Header(String),
    /// Boolean toggle.
    Checkbox(String),
    /// Free-text entry.
    Entry(String),
    /// Concealed text entry.
    PasswordEntry(String),
}

impl Widget {
    /// The user-facing label.
    pub fn label(&self) -> &str {
        match self {
            Self::Header(s) | Self::Checkbox(s) | Self::Entry(s) | Self::PasswordEntry(s) => s,
        }
    }

    /// Whether values bound to this widget are boolean flags.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Checkbox(_))
    }

    /// Whether the widget conceals what the user typed.
    pub fn is_concealed(&self) -> bool {
        matches!(self, Self::PasswordEntry(_))
    }
}

/// One slot in a page layout, optionally bound to a model key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Model key this slot edits. Headers have none.
    pub key: Option<String>,
    /// The widget descriptor.
    pub widget: Widget,
}

/// Ordered widget descriptors for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    entries: Vec<LayoutEntry>,
}

impl PageLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section heading.
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.entries.push(LayoutEntry {
            key: None,
            widget: Widget::Header(text.into()),
        });
        self
    }

    /// Add a checkbox bound to `key`.
    pub fn checkbox(self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.push_bound(key, Widget::Checkbox(label.into()))
    }

    /// Add a text entry bound to `key`.
    pub fn entry(self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.push_bound(key, Widget::Entry(label.into()))
    }

    /// Add a concealed entry bound to `key`.
    pub fn password_entry(self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.push_bound(key, Widget::PasswordEntry(label.into()))
    }

    fn push_bound(mut self, key: impl Into<String>, widget: Widget) -> Self {
        self.entries.push(LayoutEntry {
            key: Some(key.into()),
            widget,
        });
        self
    }

    /// Iterate over slots in display order.
    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.entries.iter()
    }

    /// Get the widget bound to `key`, if any.
    pub fn widget_for(&self, key: &str) -> Option<&Widget> {
        self.entries
            .iter()
            .find(|e| e.key.as_deref() == Some(key))
            .map(|e| &e.widget)
    }

    /// Iterate over bound model keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| e.key.as_deref())
    }

    /// Number of slots, headers included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the layout has no slots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout::new()
            .header("Remote Access")
            .checkbox("ssh.pwauth", "Enable SSH password authentication")
            .entry("rng.bytes", "Bytes Used:")
            .password_entry("passwd.admin.password", "Password:")
    }

    #[test]
    fn builder_preserves_display_order() {
        let built = layout();
        let keys: Vec<&str> = built.keys().collect();
        assert_eq!(
            keys,
            vec!["ssh.pwauth", "rng.bytes", "passwd.admin.password"]
        );
        assert_eq!(layout().len(), 4);
    }

    #[test]
    fn headers_are_unbound() {
        let first = layout().entries().next().cloned().unwrap();
        assert_eq!(first.key, None);
        assert_eq!(first.widget.label(), "Remote Access");
    }

    #[test]
    fn widget_lookup_by_key() {
        let layout = layout();
        assert!(layout.widget_for("ssh.pwauth").is_some_and(Widget::is_flag));
        assert!(layout
            .widget_for("passwd.admin.password")
            .is_some_and(Widget::is_concealed));
        assert_eq!(layout.widget_for("nope"), None);
    }
}

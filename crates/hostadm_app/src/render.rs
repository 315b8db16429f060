//! Plain-text rendering of page layouts.

use std::fmt::Write;

use hostadm_core::model::ChangeTracker;
use hostadm_core::plugin::{PageLayout, Widget};

/// Mask shown for concealed fields that hold a value.
const CONCEALED: &str = "********";

/// Render a page as text, one widget per line.
///
/// Checkboxes render as `[x]`/`[ ]`, entries show the effective value,
/// and concealed fields never echo what was typed. Fields with a
/// pending edit are marked with `*`.
pub fn render_page(name: &str, layout: &PageLayout, tracker: &ChangeTracker) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", name);

    for entry in layout.entries() {
        let line = match (&entry.key, &entry.widget) {
            (None, widget) => format!("\n--- {} ---", widget.label()),
            (Some(key), Widget::Checkbox(label)) => {
                let checked = tracker.effective_value(key).as_bool().unwrap_or(false);
                format!("[{}] {}{}", if checked { 'x' } else { ' ' }, label, marker(tracker, key))
            }
            (Some(key), Widget::PasswordEntry(label)) => {
                let value = tracker.effective_value(key);
                let shown = if value.is_empty() { "" } else { CONCEALED };
                format!("{} {}{}", label, shown, marker(tracker, key))
            }
            (Some(key), widget) => {
                format!(
                    "{} {}{}",
                    widget.label(),
                    tracker.effective_value(key),
                    marker(tracker, key)
                )
            }
        };
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}

fn marker(tracker: &ChangeTracker, key: &str) -> &'static str {
    if tracker.is_changed(key) {
        " *"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostadm_core::model::{ChangeSet, Model, Value};

    fn layout() -> PageLayout {
        PageLayout::new()
            .header("Remote Access")
            .checkbox("ssh.pwauth", "Allow password authentication")
            .entry("rng.bytes", "Bytes per request:")
            .password_entry("passwd.admin.password", "Administrator password:")
    }

    fn model() -> Model {
        Model::new()
            .with("ssh.pwauth", false)
            .with("rng.bytes", "1024")
            .with("passwd.admin.password", Value::Empty)
    }

    #[test]
    fn renders_every_widget_kind() {
        let tracker = ChangeTracker::new(model(), ChangeSet::new());
        let text = render_page("Security", &layout(), &tracker);

        assert!(text.contains("=== Security ==="));
        assert!(text.contains("--- Remote Access ---"));
        assert!(text.contains("[ ] Allow password authentication"));
        assert!(text.contains("Bytes per request: 1024"));
        assert!(text.contains("Administrator password:"));
        assert!(!text.contains("*"));
    }

    #[test]
    fn pending_edits_show_their_effect_and_a_marker() {
        let changes = ChangeSet::new()
            .with("ssh.pwauth", true)
            .with("rng.bytes", "2048");
        let tracker = ChangeTracker::new(model(), changes);
        let text = render_page("Security", &layout(), &tracker);

        assert!(text.contains("[x] Allow password authentication *"));
        assert!(text.contains("Bytes per request: 2048 *"));
    }

    #[test]
    fn passwords_never_echo() {
        let changes = ChangeSet::new().with("passwd.admin.password", "hunter2");
        let tracker = ChangeTracker::new(model(), changes);
        let text = render_page("Security", &layout(), &tracker);

        assert!(!text.contains("hunter2"));
        assert!(text.contains("Administrator password: ******** *"));
    }

    #[test]
    fn restated_baseline_is_not_marked() {
        let changes = ChangeSet::new().with("rng.bytes", "1024");
        let tracker = ChangeTracker::new(model(), changes);
        let text = render_page("Security", &layout(), &tracker);

        assert!(text.contains("Bytes per request: 1024"));
        assert!(!text.contains("1024 *"));
    }
}

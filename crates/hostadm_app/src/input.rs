//! Parsing of KEY=VALUE assignments from the command line.

use anyhow::{anyhow, bail, Context, Result};

use hostadm_core::model::{ChangeSet, Value};
use hostadm_core::plugin::PageLayout;

/// Parse `KEY=VALUE` assignments against a page layout.
///
/// Every key must be bound somewhere in the layout. Checkbox fields
/// take a boolean; anything else is kept as text, with the empty
/// string meaning "clear the field".
pub fn parse_assignments(layout: &PageLayout, assignments: &[String]) -> Result<ChangeSet> {
    let mut changes = ChangeSet::new();

    for assignment in assignments {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", assignment))?;

        let widget = layout
            .widget_for(key)
            .ok_or_else(|| anyhow!("unknown field '{}'", key))?;

        let value = if widget.is_flag() {
            Value::Bool(
                parse_flag(raw).with_context(|| format!("field '{}' takes a boolean", key))?,
            )
        } else if raw.is_empty() {
            Value::Empty
        } else {
            Value::text(raw)
        };

        changes.set(key, value);
    }

    Ok(changes)
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => bail!("not a boolean: '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout::new()
            .checkbox("ssh.pwauth", "Allow password authentication")
            .entry("rng.bytes", "Bytes per request:")
    }

    fn assignments(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_text_and_flags() {
        let changes =
            parse_assignments(&layout(), &assignments(&["ssh.pwauth=yes", "rng.bytes=1024"]))
                .unwrap();

        assert_eq!(changes.get("ssh.pwauth"), Some(&Value::Bool(true)));
        assert_eq!(changes.get("rng.bytes"), Some(&Value::text("1024")));
    }

    #[test]
    fn empty_text_clears_the_field() {
        let changes = parse_assignments(&layout(), &assignments(&["rng.bytes="])).unwrap();
        assert_eq!(changes.get("rng.bytes"), Some(&Value::Empty));
    }

    #[test]
    fn flag_spellings_are_forgiving() {
        for (raw, expected) in [
            ("TRUE", true),
            ("on", true),
            ("1", true),
            ("no", false),
            ("Off", false),
            ("0", false),
        ] {
            let raw_assignment = format!("ssh.pwauth={}", raw);
            let changes =
                parse_assignments(&layout(), &assignments(&[raw_assignment.as_str()])).unwrap();
            assert_eq!(changes.get("ssh.pwauth"), Some(&Value::Bool(expected)), "{}", raw);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        let err = parse_assignments(&layout(), &assignments(&["no-equals"])).unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));

        let err = parse_assignments(&layout(), &assignments(&["nope=1"])).unwrap_err();
        assert!(err.to_string().contains("unknown field 'nope'"));

        let err = parse_assignments(&layout(), &assignments(&["ssh.pwauth=maybe"])).unwrap_err();
        assert!(format!("{:#}", err).contains("not a boolean"));
    }

    #[test]
    fn later_assignments_win() {
        let changes = parse_assignments(
            &layout(),
            &assignments(&["rng.bytes=1024", "rng.bytes=2048"]),
        )
        .unwrap();
        assert_eq!(changes.get("rng.bytes"), Some(&Value::text("2048")));
    }
}

//! Field value type shared by models and change sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field value.
///
/// Pages traffic in loosely typed values: free text, boolean flags, and
/// an explicit "nothing entered" sentinel. The sentinel is a first-class
/// variant so lookups always produce a value; callers never have to
/// distinguish "missing" from "empty".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag (checkbox state).
    Bool(bool),
    /// Free-form text (entry contents).
    Text(String),
    /// Nothing entered. Serializes as `null`.
    Empty,
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Get the contained text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the contained flag, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// True for the empty sentinel and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => f.write_str(s),
            Self::Empty => Ok(()),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Bool(true).as_str(), None);
        assert_eq!(Value::text("42").as_str(), Some("42"));
        assert_eq!(Value::text("42").as_bool(), None);
        assert_eq!(Value::Empty.as_str(), None);
    }

    #[test]
    fn empty_covers_sentinel_and_blank_text() {
        assert!(Value::Empty.is_empty());
        assert!(Value::text("").is_empty());
        assert!(!Value::text("x").is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn display_renders_plainly() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::text("hello").to_string(), "hello");
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn serde_uses_plain_json_forms() {
        assert_eq!(serde_json::to_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Value::text("a")).unwrap(), "\"a\"");
        assert_eq!(serde_json::to_string(&Value::Empty).unwrap(), "null");

        let v: Value = serde_json::from_str("null").unwrap();
        assert_eq!(v, Value::Empty);
        let v: Value = serde_json::from_str("\"true\"").unwrap();
        assert_eq!(v, Value::text("true"));
    }
}

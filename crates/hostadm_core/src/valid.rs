//! Composable field validators.
//!
//! Each model key may be bound to one rule. Rules combine with the `|`
//! operator: `Validator::number(Some(0), None) | Validator::Empty`
//! accepts a non-negative number or nothing at all. A failed check
//! reports the whole composite rule, not just the branch that rejected.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitOr;

use thiserror::Error;

use crate::model::{ChangeSet, Value};

/// A field value failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for '{key}': {reason}")]
pub struct ValidationError {
    /// The model key that was being checked.
    pub key: String,
    /// What the bound rule expected.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A validation rule for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// A numeric string within inclusive bounds. `None` leaves that
    /// side unbounded.
    Number {
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Only the empty value.
    Empty,
    /// Any text, including empty.
    Text,
    /// Either rule.
    Or(Box<Validator>, Box<Validator>),
}

impl Validator {
    /// Numeric rule with inclusive bounds.
    pub fn number(min: Option<i64>, max: Option<i64>) -> Self {
        Self::Number { min, max }
    }

    /// Check a raw value, returning its normalized form.
    ///
    /// `Number` trims surrounding whitespace; `Empty` collapses blank
    /// text to the sentinel. The error string names the expected rule.
    pub fn validate(&self, raw: &Value) -> Result<Value, String> {
        self.accepts(raw)
            .ok_or_else(|| format!("expected {}", self))
    }

    fn accepts(&self, raw: &Value) -> Option<Value> {
        match self {
            Self::Number { min, max } => {
                let text = raw.as_str()?.trim();
                let number: i64 = text.parse().ok()?;
                if min.is_some_and(|lo| number < lo) {
                    return None;
                }
                if max.is_some_and(|hi| number > hi) {
                    return None;
                }
                Some(Value::text(text))
            }
            Self::Empty => raw.is_empty().then_some(Value::Empty),
            Self::Text => match raw {
                Value::Text(_) | Value::Empty => Some(raw.clone()),
                Value::Bool(_) => None,
            },
            Self::Or(a, b) => a.accepts(raw).or_else(|| b.accepts(raw)),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number {
                min: None,
                max: None,
            } => write!(f, "a number"),
            Self::Number {
                min: Some(lo),
                max: None,
            } => write!(f, "a number >= {}", lo),
            Self::Number {
                min: None,
                max: Some(hi),
            } => write!(f, "a number <= {}", hi),
            Self::Number {
                min: Some(lo),
                max: Some(hi),
            } => write!(f, "a number between {} and {}", lo, hi),
            Self::Empty => write!(f, "an empty value"),
            Self::Text => write!(f, "text"),
            Self::Or(a, b) => write!(f, "{} or {}", a, b),
        }
    }
}

impl BitOr for Validator {
    type Output = Validator;

    fn bitor(self, rhs: Validator) -> Validator {
        Validator::Or(Box::new(self), Box::new(rhs))
    }
}

/// Binds model keys to validation rules.
///
/// Keys without a rule pass through unchecked. Binding is a deliberate
/// page decision, not a safety net.
#[derive(Debug, Clone, Default)]
pub struct ValidatorMap {
    rules: BTreeMap<String, Validator>,
}

impl ValidatorMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a rule to a key (builder pattern).
    pub fn with(mut self, key: impl Into<String>, rule: Validator) -> Self {
        self.rules.insert(key.into(), rule);
        self
    }

    /// Get the rule bound to a key.
    pub fn rule(&self, key: &str) -> Option<&Validator> {
        self.rules.get(key)
    }

    /// Check one value against the rule bound to `key`.
    ///
    /// Returns the normalized value. Unbound keys pass through as-is.
    pub fn check(&self, key: &str, raw: &Value) -> Result<Value, ValidationError> {
        match self.rules.get(key) {
            Some(rule) => rule
                .validate(raw)
                .map_err(|reason| ValidationError::new(key, reason)),
            None => Ok(raw.clone()),
        }
    }

    /// Check every key present in an incoming change set, in key order.
    ///
    /// The whole edit is rejected on the first failure; on success the
    /// returned set carries the normalized values.
    pub fn check_changes(&self, changes: &ChangeSet) -> Result<ChangeSet, ValidationError> {
        let mut normalized = ChangeSet::new();
        for (key, raw) in changes.iter() {
            normalized.set(key, self.check(key, raw)?);
        }
        Ok(normalized)
    }
}

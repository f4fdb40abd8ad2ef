//! Chainable assertions over JSON values
//!
//! A small predicate surface in the spirit of `expect(value).not().equal(..)`.
//! Every check returns `Err(AssertionError)` on failure instead of panicking,
//! so the runner can record the failure against the case that produced it.

use serde_json::Value;
use thiserror::Error;

/// A failed assertion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Start an assertion chain on `value`
pub fn expect(value: &Value) -> Assertion<'_> {
    Assertion {
        subject: value,
        negate: false,
    }
}

/// An assertion subject, optionally negated
#[derive(Debug, Clone, Copy)]
pub struct Assertion<'a> {
    subject: &'a Value,
    negate: bool,
}

impl<'a> Assertion<'a> {
    /// Negate every following check
    #[must_use]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Negate when `flag` is set
    #[must_use]
    pub fn negate_if(self, flag: bool) -> Self {
        if flag {
            self.not()
        } else {
            self
        }
    }

    /// Containment: substring, array element or object subset
    pub fn include(self, needle: &Value) -> Result<(), AssertionError> {
        let found = match (self.subject, needle) {
            (Value::String(haystack), Value::String(part)) => haystack.contains(part.as_str()),
            (Value::String(_), other) => {
                return Err(AssertionError::new(format!(
                    "expected {} to include {}, but only strings can be searched in a string",
                    render(self.subject),
                    render(other)
                )))
            }
            (Value::Array(items), _) => items.iter().any(|item| same_value(item, needle)),
            (Value::Object(map), Value::Object(subset)) => subset
                .iter()
                .all(|(key, value)| map.get(key).is_some_and(|actual| same_value(actual, value))),
            (Value::Object(map), Value::String(key)) => map.contains_key(key),
            _ => {
                return Err(AssertionError::new(format!(
                    "object tested must be an array, an object, or a string, but {} given",
                    type_name(self.subject)
                )))
            }
        };
        self.verdict(found, "include", render(needle))
    }

    /// Strict equality; numbers compare by value, so `5.0` equals `5`
    pub fn equal(self, expected: &Value) -> Result<(), AssertionError> {
        self.verdict(same_value(self.subject, expected), "equal", render(expected))
    }

    /// Length of a string (in characters) or an array
    pub fn length(self, expected: usize) -> Result<(), AssertionError> {
        let actual = length_of(self.subject).ok_or_else(|| {
            AssertionError::new(format!(
                "expected {} to have property 'length'",
                render(self.subject)
            ))
        })?;
        if (actual == expected) != self.negate {
            Ok(())
        } else {
            Err(AssertionError::new(format!(
                "expected {} to {}have a length of {} but got {}",
                render(self.subject),
                self.not_word(),
                expected,
                actual
            )))
        }
    }

    /// Property presence, including the implicit `length` and index
    /// properties of strings and arrays
    pub fn property(self, name: &str) -> Result<(), AssertionError> {
        if self.subject.is_null() {
            return Err(AssertionError::new(format!(
                "expected null to have property '{name}', but the target is null"
            )));
        }
        let present = match self.subject {
            Value::Object(map) => map.contains_key(name),
            Value::Array(_) | Value::String(_) => {
                let len = length_of(self.subject).unwrap_or(0);
                name == "length" || name.parse::<usize>().map_or(false, |index| index < len)
            }
            _ => false,
        };
        self.verdict(present, "have property", format!("'{name}'"))
    }

    /// Runtime type name, compared case-insensitively
    pub fn a(self, expected: &str) -> Result<(), AssertionError> {
        let matches = type_name(self.subject).eq_ignore_ascii_case(expected);
        self.verdict(matches, "be a", expected.to_string())
    }

    fn verdict(self, outcome: bool, verb: &str, expected: String) -> Result<(), AssertionError> {
        if outcome != self.negate {
            Ok(())
        } else {
            Err(AssertionError::new(format!(
                "expected {} to {}{} {}",
                render(self.subject),
                self.not_word(),
                verb,
                expected
            )))
        }
    }

    fn not_word(self) -> &'static str {
        if self.negate {
            "not "
        } else {
            ""
        }
    }
}

/// The runtime type name of a JSON value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Deep equality with a single number type
pub fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| same_value(value, other)))
        }
        _ => left == right,
    }
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn render(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 120 {
        let head: String = text.chars().take(117).collect();
        format!("{head}...")
    } else {
        text
    }
}

//! Expectation descriptors
//!
//! Datasets describe the expected result of each case with a small mapping:
//!
//! ```yaml
//! result: { not: true, equal: 6 }
//! ```
//!
//! The mapping is parsed into [`ExpectationDescriptor`] and folded into a
//! single [`Expectation`] by field precedence: `include`, then `equal`,
//! `length`, `property`, `be`. `include` ignores `not`.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::assertion::{expect, AssertionError};

/// The raw expectation mapping as written in a dataset
///
/// Keys are matched by presence: `equal: 0` and `equal: null` are equality
/// checks, not missing keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpectationDescriptor {
    #[serde(deserialize_with = "present")]
    pub include: Option<Value>,
    pub not: bool,
    #[serde(deserialize_with = "present")]
    pub equal: Option<Value>,
    pub length: Option<usize>,
    pub property: Option<String>,
    pub be: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One assertion category with its negation flag
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "ExpectationDescriptor")]
pub enum Expectation {
    /// Containment; never negated
    Include(Value),
    Equal { expected: Value, negate: bool },
    Length { expected: usize, negate: bool },
    Property { name: String, negate: bool },
    TypeOf { name: String, negate: bool },
    /// No assertion; the case passes once the wrapper completes
    #[default]
    Unchecked,
}

impl From<ExpectationDescriptor> for Expectation {
    fn from(descriptor: ExpectationDescriptor) -> Self {
        let negate = descriptor.not;
        match descriptor {
            ExpectationDescriptor {
                include: Some(needle),
                ..
            } => Self::Include(needle),
            ExpectationDescriptor {
                equal: Some(expected),
                ..
            } => Self::Equal { expected, negate },
            ExpectationDescriptor {
                length: Some(expected),
                ..
            } => Self::Length { expected, negate },
            ExpectationDescriptor {
                property: Some(name),
                ..
            } => Self::Property { name, negate },
            ExpectationDescriptor { be: Some(name), .. } => Self::TypeOf { name, negate },
            _ => Self::Unchecked,
        }
    }
}

impl Expectation {
    pub fn include(needle: impl Into<Value>) -> Self {
        Self::Include(needle.into())
    }

    pub fn equal(expected: impl Into<Value>) -> Self {
        Self::Equal {
            expected: expected.into(),
            negate: false,
        }
    }

    pub fn length(expected: usize) -> Self {
        Self::Length {
            expected,
            negate: false,
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self::Property {
            name: name.into(),
            negate: false,
        }
    }

    pub fn type_of(name: impl Into<String>) -> Self {
        Self::TypeOf {
            name: name.into(),
            negate: false,
        }
    }

    /// Flip the negation flag; `Include` and `Unchecked` are returned as is
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            Self::Equal { expected, negate } => Self::Equal {
                expected,
                negate: !negate,
            },
            Self::Length { expected, negate } => Self::Length {
                expected,
                negate: !negate,
            },
            Self::Property { name, negate } => Self::Property {
                name,
                negate: !negate,
            },
            Self::TypeOf { name, negate } => Self::TypeOf {
                name,
                negate: !negate,
            },
            other => other,
        }
    }

    /// Short name of the assertion category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Include(_) => "include",
            Self::Equal { .. } => "equal",
            Self::Length { .. } => "length",
            Self::Property { .. } => "property",
            Self::TypeOf { .. } => "be",
            Self::Unchecked => "unchecked",
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let not = |negate: bool| if negate { "not " } else { "" };
        match self {
            Self::Include(needle) => write!(f, "include {needle}"),
            Self::Equal { expected, negate } => write!(f, "{}equal {expected}", not(*negate)),
            Self::Length { expected, negate } => write!(f, "{}length {expected}", not(*negate)),
            Self::Property { name, negate } => write!(f, "{}property '{name}'", not(*negate)),
            Self::TypeOf { name, negate } => write!(f, "{}be a {name}", not(*negate)),
            Self::Unchecked => write!(f, "unchecked"),
        }
    }
}

/// Run the single assertion `expectation` describes against `value`
pub fn evaluate(value: &Value, expectation: &Expectation) -> Result<(), AssertionError> {
    match expectation {
        Expectation::Include(needle) => expect(value).include(needle),
        Expectation::Equal { expected, negate } => expect(value).negate_if(*negate).equal(expected),
        Expectation::Length { expected, negate } => {
            expect(value).negate_if(*negate).length(*expected)
        }
        Expectation::Property { name, negate } => expect(value).negate_if(*negate).property(name),
        Expectation::TypeOf { name, negate } => expect(value).negate_if(*negate).a(name),
        Expectation::Unchecked => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> Expectation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_precedence_order() {
        assert_eq!(
            parse(json!({"include": 1, "equal": 2, "length": 3})),
            Expectation::include(1)
        );
        assert_eq!(
            parse(json!({"equal": 2, "length": 3, "property": "x"})),
            Expectation::equal(2)
        );
        assert_eq!(
            parse(json!({"length": 3, "property": "x", "be": "array"})),
            Expectation::length(3)
        );
        assert_eq!(
            parse(json!({"property": "x", "be": "object"})),
            Expectation::property("x")
        );
        assert_eq!(parse(json!({"be": "string"})), Expectation::type_of("string"));
        assert_eq!(parse(json!({})), Expectation::Unchecked);
    }

    #[test]
    fn test_include_ignores_not() {
        let expectation = parse(json!({"include": "ell", "not": true}));
        assert_eq!(expectation, Expectation::include("ell"));

        // The flag is dropped, so containment is asserted positively.
        assert!(evaluate(&json!("hello"), &expectation).is_ok());
        assert!(evaluate(&json!("world"), &expectation).is_err());
    }

    #[test]
    fn test_not_composes_with_other_categories() {
        assert_eq!(
            parse(json!({"not": true, "equal": 6})),
            Expectation::Equal {
                expected: json!(6),
                negate: true
            }
        );
        assert_eq!(
            parse(json!({"not": true, "be": "string"})),
            Expectation::type_of("string").negated()
        );
    }

    #[test]
    fn test_presence_not_truthiness() {
        assert_eq!(parse(json!({"equal": 0})), Expectation::equal(0));
        assert_eq!(parse(json!({"equal": null})), Expectation::equal(Value::Null));
        assert_eq!(parse(json!({"equal": false})), Expectation::equal(false));
        assert_eq!(parse(json!({"length": 0})), Expectation::length(0));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert_eq!(parse(json!({"deep": true, "equal": 1})), Expectation::equal(1));
    }

    #[test]
    fn test_equal_only_flipping_not_inverts_outcome() {
        let value = json!(5);
        for (expected, passes) in [(json!(5), true), (json!(6), false), (json!("5"), false)] {
            let plain = Expectation::equal(expected.clone());
            assert_eq!(evaluate(&value, &plain).is_ok(), passes);
            assert_eq!(evaluate(&value, &plain.negated()).is_ok(), !passes);
        }
    }

    #[test]
    fn test_evaluate_each_category() {
        assert!(evaluate(&json!([1, 2, 3]), &Expectation::length(3)).is_ok());
        assert!(evaluate(&json!({"x": 1}), &Expectation::property("x")).is_ok());
        assert!(evaluate(&json!({"x": 1}), &Expectation::type_of("object")).is_ok());
        assert!(evaluate(&json!([1, 2]), &Expectation::include(2)).is_ok());
        assert!(evaluate(&json!("anything"), &Expectation::Unchecked).is_ok());
    }

    #[test]
    fn test_negated_leaves_include_alone() {
        assert_eq!(Expectation::include(1).negated(), Expectation::include(1));
        assert_eq!(Expectation::Unchecked.negated(), Expectation::Unchecked);
        assert_eq!(
            Expectation::length(2).negated().negated(),
            Expectation::length(2)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Expectation::equal(5).to_string(), "equal 5");
        assert_eq!(Expectation::equal(6).negated().to_string(), "not equal 6");
        assert_eq!(Expectation::property("x").to_string(), "property 'x'");
        assert_eq!(Expectation::type_of("array").to_string(), "be a array");
        assert_eq!(Expectation::include("a").to_string(), "include \"a\"");
    }

    #[test]
    fn test_from_yaml() {
        let expectation: Expectation = serde_yaml::from_str("not: true\nlength: 2\n").unwrap();
        assert_eq!(expectation, Expectation::length(2).negated());
    }
}

//! Expectation evaluation
//!
//! Maps declarative expectation descriptors onto assertions over the value a
//! tested function returned. Nothing here knows how the value was produced.

mod assertion;
mod expectation;

pub use assertion::{expect, type_name, Assertion, AssertionError};
pub use expectation::{evaluate, Expectation, ExpectationDescriptor};

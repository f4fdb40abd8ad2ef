//! Test registration and execution
//!
//! The engine only talks to the [`Registry`] trait. [`Suite`] is the runner
//! shipped with the crate: it records registrations and later executes the
//! cases sequentially, owning timeouts and reporting.

mod registry;
mod suite;

pub use registry::{CaseBody, CaseFailure, CaseFuture, Registry};
pub use suite::{CaseResult, Suite, SuiteReport};

//! The registration interface the engine drives
//!
//! Registration is synchronous: group bodies run immediately and register
//! their nested content. Case bodies are only stored; the runner calls them
//! later and awaits the returned future.

use std::time::Duration;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::expect::AssertionError;

/// Why a case failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseFailure {
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// The completion was dropped, or the task was cancelled, before a
    /// result arrived
    #[error("case finished without delivering a result")]
    Abandoned,

    #[error("timeout of {}ms exceeded", .0.as_millis())]
    TimedOut(Duration),

    #[error("case panicked: {0}")]
    Panicked(String),
}

/// The deferred part of a case: resolves to `Ok(())` once the case completed
pub type CaseFuture = BoxFuture<'static, Result<(), CaseFailure>>;

/// Builds the case future when the runner gets to the case
pub type CaseBody = Box<dyn FnOnce() -> CaseFuture + Send>;

/// Something that accepts group and case registrations
pub trait Registry {
    /// Register a named group; `body` runs before this returns
    fn register_group(&mut self, label: &str, body: &mut dyn FnMut(&mut dyn Registry));

    /// Register a case in the innermost open group
    fn register_case(&mut self, label: &str, body: CaseBody);
}

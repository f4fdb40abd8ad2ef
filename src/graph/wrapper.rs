//! Invocation wrappers: how a tested function is called
//!
//! A wrapper receives the function, the case being run and a [`Completion`].
//! It calls the function however that function needs to be called and hands
//! the result to the completion, now or later.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::oneshot;

use super::dataset::TestCase;
use super::object::Function;
use crate::common::panic_message;

/// What a completion hands back to the waiting case
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Delivery {
    Value(Value),
    Panicked(String),
}

/// One-shot completion signal for a running case
///
/// Completing delivers the value to the evaluator. Dropping a completion
/// without completing fails the case as abandoned; holding on to it forever
/// stalls the case until the runner's timeout.
pub struct Completion {
    sender: oneshot::Sender<Delivery>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Delivery>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Deliver the result of the tested function
    pub fn complete(self, value: Value) {
        self.deliver(Delivery::Value(value));
    }

    /// Report that the tested function panicked off the case's task
    pub fn panicked(self, message: impl Into<String>) {
        self.deliver(Delivery::Panicked(message.into()));
    }

    fn deliver(self, delivery: Delivery) {
        // The receiver is gone once the case timed out.
        if self.sender.send(delivery).is_err() {
            tracing::debug!("completion delivered after the case stopped waiting");
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// A calling convention for tested functions
pub trait Wrapper: Send + Sync {
    fn invoke(&self, function: &Function, case: &TestCase, done: Completion);
}

impl<F> Wrapper for F
where
    F: Fn(&Function, &TestCase, Completion) + Send + Sync,
{
    fn invoke(&self, function: &Function, case: &TestCase, done: Completion) {
        self(function, case, done)
    }
}

/// Calls `function(case.arguments)` synchronously and completes with the
/// return value unmodified
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWrapper;

impl Wrapper for DefaultWrapper {
    fn invoke(&self, function: &Function, case: &TestCase, done: Completion) {
        done.complete(function.call(&case.arguments));
    }
}

/// Runs the function on tokio's blocking pool and completes from there
///
/// A panic on the blocking pool is caught and delivered as a panic of the
/// case.
/// Must be invoked from within a tokio runtime, which is always the case
/// inside [`crate::runner::Suite::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingWrapper;

impl Wrapper for BlockingWrapper {
    fn invoke(&self, function: &Function, case: &TestCase, done: Completion) {
        let function = function.clone();
        let arguments = case.arguments.clone();
        tokio::task::spawn_blocking(move || {
            match catch_unwind(AssertUnwindSafe(|| function.call(&arguments))) {
                Ok(value) => done.complete(value),
                Err(payload) => done.panicked(panic_message(&*payload)),
            }
        });
    }
}

/// A node of the wrapper graph
#[derive(Clone)]
pub enum WrapperNode {
    Wrapper(Arc<dyn Wrapper>),
    Branch(IndexMap<String, WrapperNode>),
}

impl WrapperNode {
    pub fn wrapper(wrapper: impl Wrapper + 'static) -> Self {
        Self::Wrapper(Arc::new(wrapper))
    }

    pub fn branch<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, WrapperNode)>,
    {
        Self::Branch(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    /// Child at `key`; a missing or terminal node has no children
    pub fn get(&self, key: &str) -> Option<&WrapperNode> {
        match self {
            Self::Branch(children) => children.get(key),
            Self::Wrapper(_) => None,
        }
    }

    /// The wrapper held by a terminal node
    pub fn as_wrapper(&self) -> Option<&Arc<dyn Wrapper>> {
        match self {
            Self::Wrapper(wrapper) => Some(wrapper),
            Self::Branch(_) => None,
        }
    }
}

impl fmt::Debug for WrapperNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapper(_) => f.write_str("Wrapper"),
            Self::Branch(children) => f.debug_map().entries(children.iter()).finish(),
        }
    }
}

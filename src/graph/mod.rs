//! The three input trees
//!
//! - the object graph holds the functions under test,
//! - the dataset graph holds the cases for each tested path,
//! - the wrapper graph holds per-function calling conventions.
//!
//! The walker pairs them by key; see [`crate::engine`].

mod dataset;
mod object;
mod wrapper;

pub use dataset::{DatasetNode, TestCase};
pub use object::{Function, ObjectNode};
pub(crate) use wrapper::Delivery;
pub use wrapper::{BlockingWrapper, Completion, DefaultWrapper, Wrapper, WrapperNode};

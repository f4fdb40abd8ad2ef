//! treetest - declarative test generation
//!
//! Describe what to test as data: an object graph of functions, a dataset
//! graph of cases shaped like it, and optional per-function invocation
//! wrappers. The engine walks the graphs, registers one group per tested
//! function and one case per dataset entry, and checks each result against
//! a declarative expectation (`equal`, `include`, `length`, `property`, `be`,
//! optionally negated with `not`).
//!
//! ```no_run
//! use serde_json::json;
//! use treetest::{common::config::RunnerConfig, DatasetNode, ObjectNode, StartOptions};
//!
//! # async fn demo() -> treetest::Result<()> {
//! let object = ObjectNode::object([(
//!     "add",
//!     ObjectNode::function(|a| json!(a[0].as_i64().unwrap_or(0) + a[1].as_i64().unwrap_or(0))),
//! )]);
//! let dataset = DatasetNode::from_yaml_str(
//!     "add:\n  - label: adds two numbers\n    arguments: [2, 3]\n    result: { equal: 5 }\n",
//! )?;
//!
//! let options = StartOptions::new("calculator", "root", object, dataset);
//! treetest::suite(&options)
//!     .run(&RunnerConfig::default())
//!     .await
//!     .assert_success();
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod common;
pub mod engine;
pub mod expect;
pub mod graph;
pub mod probe;
pub mod runner;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use engine::{start, suite, StartOptions};
pub use expect::{evaluate, Expectation};
pub use graph::{
    BlockingWrapper, Completion, DatasetNode, DefaultWrapper, Function, ObjectNode, TestCase,
    Wrapper, WrapperNode,
};
pub use runner::{CaseFailure, Registry, Suite, SuiteReport};

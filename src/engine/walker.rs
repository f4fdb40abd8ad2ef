//! Tree walker
//!
//! Pairs the object, dataset and wrapper graphs by key. The dataset decides
//! what gets tested: keys are visited in dataset order, and a key only
//! produces cases when the object graph holds a function at the same path.
//!
//! The walk happens in two steps. [`zip`] builds one combined tree of
//! terminals and branches borrowing the inputs, then [`register`] hands every
//! terminal to the case runner.

use std::sync::Arc;

use crate::common::join_namespace;
use crate::graph::{DatasetNode, Function, ObjectNode, TestCase, Wrapper, WrapperNode};
use crate::runner::Registry;

use super::case;

/// A node of the combined tree
pub enum Node<'a> {
    /// A function with its cases and, if one was given, its wrapper
    Terminal {
        function: &'a Function,
        cases: &'a [TestCase],
        wrapper: Option<&'a Arc<dyn Wrapper>>,
    },
    Branch(Vec<(&'a str, Node<'a>)>),
}

impl Node<'_> {
    /// Number of cases below this node
    pub fn case_count(&self) -> usize {
        match self {
            Self::Terminal { cases, .. } => cases.len(),
            Self::Branch(children) => children.iter().map(|(_, child)| child.case_count()).sum(),
        }
    }
}

/// Zip the three graphs into one tree
///
/// Returns `None` when `object` is not an object or `dataset` is not a
/// branch. Keys missing from the object graph are skipped; a missing wrapper
/// node means no wrapper for anything below it.
pub fn zip<'a>(
    object: &'a ObjectNode,
    dataset: &'a DatasetNode,
    wrapper: Option<&'a WrapperNode>,
) -> Option<Node<'a>> {
    let ObjectNode::Object(_) = object else {
        return None;
    };
    let DatasetNode::Branch(entries) = dataset else {
        tracing::debug!("dataset is not a branch where an object was expected, skipping");
        return None;
    };

    let mut children = Vec::with_capacity(entries.len());
    for (key, data) in entries {
        let child_wrapper = wrapper.and_then(|w| w.get(key));
        match object.get(key) {
            Some(ObjectNode::Function(function)) => match data {
                DatasetNode::Cases(cases) => children.push((
                    key.as_str(),
                    Node::Terminal {
                        function,
                        cases,
                        wrapper: child_wrapper.and_then(WrapperNode::as_wrapper),
                    },
                )),
                DatasetNode::Branch(_) | DatasetNode::Value(_) => {
                    tracing::debug!(key = %key, "dataset for a function is not a case list, skipping");
                }
            },
            Some(child @ ObjectNode::Object(_)) => {
                if let Some(node) = zip(child, data, child_wrapper) {
                    children.push((key.as_str(), node));
                }
            }
            Some(ObjectNode::Value(_)) | None => {
                tracing::debug!(key = %key, "no function or object for dataset key, skipping");
            }
        }
    }

    Some(Node::Branch(children))
}

/// Register every terminal of `node` under `namespace`
pub fn register(
    registry: &mut dyn Registry,
    node: &Node<'_>,
    namespace: &str,
    default_wrapper: &Arc<dyn Wrapper>,
) {
    match node {
        Node::Terminal {
            function,
            cases,
            wrapper,
        } => {
            let wrapper = wrapper.map_or_else(|| Arc::clone(default_wrapper), Arc::clone);
            case::run(registry, namespace, cases, function, wrapper);
        }
        Node::Branch(children) => {
            for (key, child) in children {
                register(registry, child, &join_namespace(namespace, key), default_wrapper);
            }
        }
    }
}

/// Walk the three graphs from `namespace` and register what they describe
pub fn map_keys(
    registry: &mut dyn Registry,
    object: &ObjectNode,
    dataset: &DatasetNode,
    namespace: &str,
    wrapper: Option<&WrapperNode>,
    default_wrapper: &Arc<dyn Wrapper>,
) {
    if let Some(node) = zip(object, dataset, wrapper) {
        tracing::debug!(namespace, cases = node.case_count(), "walked object graph");
        register(registry, &node, namespace, default_wrapper);
    }
}

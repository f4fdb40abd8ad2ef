//! Test generation
//!
//! [`start`] registers one top-level group, then walks the object graph
//! along the dataset graph and registers a group per tested function and a
//! case per dataset entry. Registration finishes before `start` returns;
//! nothing is invoked until the registry's runner executes the cases.

pub mod case;
pub mod walker;

use std::fmt;
use std::sync::Arc;

use crate::graph::{DatasetNode, DefaultWrapper, ObjectNode, Wrapper, WrapperNode};
use crate::runner::{Registry, Suite};

pub use walker::map_keys;

/// Everything one `start` call needs
#[derive(Clone)]
pub struct StartOptions {
    /// Label of the top-level group
    pub description: String,
    /// Initial namespace, e.g. the name the object graph is known by
    pub root: String,
    pub object: ObjectNode,
    pub dataset: DatasetNode,
    pub wrapper: Option<WrapperNode>,
    /// Used for every function without a wrapper of its own
    pub default_wrapper: Arc<dyn Wrapper>,
}

impl StartOptions {
    pub fn new(
        description: impl Into<String>,
        root: impl Into<String>,
        object: ObjectNode,
        dataset: DatasetNode,
    ) -> Self {
        Self {
            description: description.into(),
            root: root.into(),
            object,
            dataset,
            wrapper: None,
            default_wrapper: Arc::new(DefaultWrapper),
        }
    }

    #[must_use]
    pub fn with_wrapper(mut self, wrapper: WrapperNode) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    #[must_use]
    pub fn with_default_wrapper(mut self, wrapper: impl Wrapper + 'static) -> Self {
        self.default_wrapper = Arc::new(wrapper);
        self
    }
}

impl fmt::Debug for StartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartOptions")
            .field("description", &self.description)
            .field("root", &self.root)
            .field("object", &self.object)
            .field("dataset", &self.dataset)
            .field("wrapper", &self.wrapper)
            .finish_non_exhaustive()
    }
}

/// Register the suite `options` describes with `registry`
pub fn start(registry: &mut dyn Registry, options: &StartOptions) {
    tracing::debug!(description = %options.description, root = %options.root, "starting");
    registry.register_group(&options.description, &mut |registry: &mut dyn Registry| {
        map_keys(
            registry,
            &options.object,
            &options.dataset,
            &options.root,
            options.wrapper.as_ref(),
            &options.default_wrapper,
        );
    });
}

/// Register `options` with a fresh [`Suite`]
pub fn suite(options: &StartOptions) -> Suite {
    let mut suite = Suite::new();
    start(&mut suite, options);
    suite
}

//! The object graph: the functions under test

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// A tested function
///
/// Takes a single argument value (which may be an array when the function
/// needs several logical arguments) and returns a value. Cloning is cheap.
#[derive(Clone)]
pub struct Function {
    inner: Arc<dyn Fn(&Value) -> Value + Send + Sync>,
}

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Call the function with `arguments`
    pub fn call(&self, arguments: &Value) -> Value {
        (self.inner)(arguments)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}

/// A node of the object graph
#[derive(Debug, Clone)]
pub enum ObjectNode {
    Function(Function),
    Object(IndexMap<String, ObjectNode>),
    /// A plain value; never tested
    Value(Value),
}

impl ObjectNode {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Function(Function::new(f))
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ObjectNode)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Child at `key`, if this node is an object
    pub fn get(&self, key: &str) -> Option<&ObjectNode> {
        match self {
            Self::Object(children) => children.get(key),
            _ => None,
        }
    }
}

impl From<Function> for ObjectNode {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

//! Common utilities shared between the library and the CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

use std::any::Any;

/// Join a namespace path and a key with a dot
///
/// Namespaces are display labels; the same path can be produced twice.
pub fn join_namespace(namespace: &str, key: &str) -> String {
    format!("{namespace}.{key}")
}

/// Text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

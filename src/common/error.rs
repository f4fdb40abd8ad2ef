//! Error types for treetest
//!
//! These cover loading and configuration problems. Assertion and case
//! failures are not errors of the engine; they live in
//! [`crate::expect::AssertionError`] and [`crate::runner::CaseFailure`] and are
//! reported per case by the runner.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for treetest
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Dataset Errors ===
    #[error("Invalid dataset '{path}': {reason}")]
    DatasetParse { path: String, reason: String },

    #[error("Unsupported dataset format '{0}'. Use .yaml, .yml or .json")]
    UnsupportedFormat(String),

    // === Probe Errors ===
    #[error("Package not found: {0}")]
    PackagesMissing(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a dataset parse error for a file
    pub fn dataset_parse(path: &str, reason: impl ToString) -> Self {
        Self::DatasetParse {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &str, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.to_string(),
            error: error.to_string(),
        }
    }
}

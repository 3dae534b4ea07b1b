//! Error types for the console view-model layer
//!
//! Builders in [`crate::info`] are total and never produce these errors;
//! they only surface from snapshot loading, schema construction and
//! genuinely unexpected validation failures.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading resources or validating forms
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML decoding error
    #[error("Failed to decode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding error
    #[error("Failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Resource kind the snapshot loader does not know
    #[error("Unsupported resource kind '{kind}' (apiVersion {api_version})")]
    UnsupportedKind { kind: String, api_version: String },

    /// Resource document without apiVersion or kind
    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    /// Invalid regular expression in a validation rule
    #[error("Invalid validation pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A custom validation predicate failed to run
    #[error("Validation test '{test}' on field {field} failed: {reason}")]
    ValidationTest {
        field: String,
        test: String,
        reason: String,
    },

    /// Sync interval parse error
    #[error("Failed to parse sync interval: {0}")]
    IntervalParse(String),
}

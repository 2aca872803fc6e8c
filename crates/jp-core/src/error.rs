//! Error types for jetperf

use thiserror::Error;

/// jetperf error type
#[derive(Error, Debug)]
pub enum Error {
    /// Flavor label or slot outside the B/C/U/T set
    #[error("Unknown flavor: {0}")]
    UnknownFlavor(String),

    /// A sibling group or dataset with this name already exists
    #[error("Duplicate group: '{0}' already exists")]
    DuplicateGroup(String),

    /// Two histograms (or containers of them) with different binning were combined
    #[error("Incompatible binning: {0}")]
    IncompatibleBinning(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

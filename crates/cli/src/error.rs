//! CLI error types with user-facing kinds.

use std::path::PathBuf;

use domain::OrderError;
use pricing::PricingError;
use thiserror::Error;

/// Errors reported by the `delivery` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The order was rejected by the domain.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The pricing configuration is invalid.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid JSON for the expected shape.
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment variable holds an unusable value.
    #[error("Invalid configuration: {key}={value:?}")]
    InvalidConfig { key: &'static str, value: String },

    /// The command line is wrong.
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Returns the error kind shown to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Order(err) => err.kind(),
            CliError::Pricing(err) => err.kind(),
            CliError::Io { .. } => "Io",
            CliError::Json(_) => "MalformedInput",
            CliError::InvalidConfig { .. } => "InvalidConfig",
            CliError::Usage(_) => "Usage",
        }
    }
}

//! Error types for coastcvi

use thiserror::Error;

/// Main error type for coastcvi operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    #[error("Unknown formula tag: {0}")]
    UnknownFormula(String),

    #[error("Registry integrity violation in {owner}: {reason}")]
    RegistryIntegrity { owner: String, reason: String },

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(&'static str),

    #[error("Segmentation would produce {estimated} segments (threshold {threshold}); confirmation required")]
    ConfirmationRequired { estimated: usize, threshold: usize },

    #[error("Invalid feature {id}: {reason}")]
    InvalidFeature { id: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn integrity(owner: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::RegistryIntegrity {
            owner: owner.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for coastcvi operations
pub type Result<T> = std::result::Result<T, Error>;

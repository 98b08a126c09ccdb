//! Error types for hosted cluster creation

use std::time::Duration;

use thiserror::Error;

use crate::platform::gcp::IdentifierError;

/// Main error type for cluster creation
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The GCP project identifier failed validation
    #[error("invalid project identifier: {0}")]
    InvalidProject(#[source] IdentifierError),

    /// The GCP region failed validation
    #[error("invalid region: {0}")]
    InvalidRegion(#[source] IdentifierError),

    /// Validation error for generic create options
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization error while rendering manifests
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Failed to write rendered manifests
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The command did not finish within its timeout
    #[error("timed out after {0:?} creating cluster")]
    Timeout(Duration),
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

//! GCP identifier validation
//!
//! Client-side checks that mirror GCP's naming rules so that a bad project or
//! region is rejected before anything is rendered.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum length of a GCP project ID
pub const PROJECT_ID_MIN_LEN: usize = 6;
/// Maximum length of a GCP project ID
pub const PROJECT_ID_MAX_LEN: usize = 30;
/// Maximum length of a GCP region
pub const REGION_MAX_LEN: usize = 63;

static PROJECT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]{4,28}[a-z0-9]$").expect("project ID pattern is a valid regex")
});

static REGION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+-[a-z0-9]+[0-9]$").expect("region pattern is a valid regex")
});

/// Why an identifier was rejected
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// Length is outside the allowed bounds
    #[error("must be between {min} and {max} characters, got {actual}")]
    Length {
        /// Minimum allowed length
        min: usize,
        /// Maximum allowed length
        max: usize,
        /// Length of the rejected identifier
        actual: usize,
    },

    /// Characters or shape do not match the grammar
    #[error("must {expected}")]
    Format {
        /// Human-readable description of the expected shape
        expected: &'static str,
    },

    /// Identifier is absent
    #[error("cannot be empty")]
    Empty,
}

/// Validate a GCP project ID
///
/// Project IDs are 6 to 30 characters of lowercase letters, digits and
/// hyphens. They start with a letter and do not end with a hyphen.
pub fn validate_project_id(project_id: &str) -> Result<(), IdentifierError> {
    let len = project_id.len();
    if !(PROJECT_ID_MIN_LEN..=PROJECT_ID_MAX_LEN).contains(&len) {
        return Err(IdentifierError::Length {
            min: PROJECT_ID_MIN_LEN,
            max: PROJECT_ID_MAX_LEN,
            actual: len,
        });
    }

    if !PROJECT_ID_PATTERN.is_match(project_id) {
        return Err(IdentifierError::Format {
            expected: "start with a lowercase letter, contain only lowercase letters, digits, and hyphens, and not end with a hyphen",
        });
    }

    Ok(())
}

/// Validate a GCP region
///
/// Regions have the shape `<letters>-<lettersOrDigits><digit>`, for example
/// `us-central1` or `europe-west2`.
pub fn validate_region(region: &str) -> Result<(), IdentifierError> {
    if region.is_empty() {
        return Err(IdentifierError::Empty);
    }

    let len = region.len();
    if len > REGION_MAX_LEN {
        return Err(IdentifierError::Length {
            min: 1,
            max: REGION_MAX_LEN,
            actual: len,
        });
    }

    if !REGION_PATTERN.is_match(region) {
        return Err(IdentifierError::Format {
            expected: "be in the format <letters>-<lettersOrDigits><digit> (e.g., us-central1, europe-west2)",
        });
    }

    Ok(())
}

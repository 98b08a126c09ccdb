//! Google Cloud Platform
//!
//! Validates the GCP project and region and stamps them onto the
//! HostedCluster. GCP needs no resources beyond the HostedCluster and its
//! default NodePool.

mod options;
mod validation;

pub use options::{CompletedCreateOptions, RawCreateOptions, ValidatedCreateOptions};
pub use validation::{
    validate_project_id, validate_region, IdentifierError, PROJECT_ID_MAX_LEN,
    PROJECT_ID_MIN_LEN, REGION_MAX_LEN,
};

/// Default GCP options, before any flags are bound
pub fn default_options() -> RawCreateOptions {
    RawCreateOptions::default()
}

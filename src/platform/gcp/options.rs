//! Staged create options for GCP hosted clusters
//!
//! Options move through three stages, each a distinct type:
//!
//! 1. [`RawCreateOptions`] - flags exactly as the user typed them
//! 2. [`ValidatedCreateOptions`] - identifiers have passed validation
//! 3. [`CompletedCreateOptions`] - cluster identity has been captured
//!
//! The later stages have private fields, so the only way to obtain one is
//! the previous stage's transition. Code that renders a cluster can therefore
//! never see options that skipped validation.

use clap::Args;

use super::validation::{validate_project_id, validate_region};
use crate::cluster::{
    CreateOptions, DefaultNodePoolConstructor, Platform, PlatformCompleter, PlatformValidator,
};
use crate::crd::{GcpPlatformSpec, HostedCluster, NodePool, PlatformType};
use crate::{Error, Result};

use kube::core::DynamicObject;

/// GCP flags as supplied on the command line
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCreateOptions {
    /// GCP project ID where the HostedCluster will be created
    #[arg(long, required = true)]
    pub project: String,

    /// GCP region where the HostedCluster will be created
    #[arg(long, required = true)]
    pub region: String,
}

/// GCP options whose identifiers have been validated
///
/// The only way in is [`PlatformValidator::validate`]:
///
/// ```
/// use lattice_hcp::cluster::{CreateOptions, PlatformValidator};
/// use lattice_hcp::platform::gcp::RawCreateOptions;
///
/// let raw = RawCreateOptions {
///     project: "my-project-123".to_string(),
///     region: "us-central1".to_string(),
/// };
/// let validated = raw.validate(&CreateOptions::default()).unwrap();
/// assert_eq!(validated.project(), "my-project-123");
/// ```
///
/// Raw flags cannot be wrapped directly:
///
/// ```compile_fail
/// let validated = lattice_hcp::platform::gcp::ValidatedCreateOptions {
///     raw: Default::default(),
/// };
/// ```
#[derive(Debug)]
pub struct ValidatedCreateOptions {
    raw: RawCreateOptions,
}

impl ValidatedCreateOptions {
    /// Validated GCP project ID
    pub fn project(&self) -> &str {
        &self.raw.project
    }

    /// Validated GCP region
    pub fn region(&self) -> &str {
        &self.raw.region
    }
}

/// GCP options ready to be applied to a cluster
///
/// Produced only by [`PlatformCompleter::complete`]:
///
/// ```
/// use lattice_hcp::cluster::{CreateOptions, PlatformCompleter, PlatformValidator};
/// use lattice_hcp::platform::gcp::RawCreateOptions;
///
/// let opts = CreateOptions::default();
/// let raw = RawCreateOptions {
///     project: "my-project-123".to_string(),
///     region: "us-central1".to_string(),
/// };
/// let completed = raw.validate(&opts).unwrap().complete(&opts).unwrap();
/// assert_eq!(completed.name(), "example");
/// ```
///
/// Skipping the earlier stages does not compile:
///
/// ```compile_fail
/// use lattice_hcp::cluster::{CreateOptions, PlatformValidator};
/// use lattice_hcp::platform::gcp::{CompletedCreateOptions, RawCreateOptions};
///
/// let raw = RawCreateOptions {
///     project: "my-project-123".to_string(),
///     region: "us-central1".to_string(),
/// };
/// let completed = CompletedCreateOptions {
///     validated: raw.validate(&CreateOptions::default()).unwrap(),
///     name: String::new(),
///     namespace: String::new(),
///     external_dns_domain: None,
/// };
/// ```
#[derive(Debug)]
pub struct CompletedCreateOptions {
    validated: ValidatedCreateOptions,
    name: String,
    namespace: String,
    external_dns_domain: Option<String>,
}

impl CompletedCreateOptions {
    /// GCP project ID
    pub fn project(&self) -> &str {
        self.validated.project()
    }

    /// GCP region
    pub fn region(&self) -> &str {
        self.validated.region()
    }

    /// HostedCluster name captured at completion
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HostedCluster namespace captured at completion
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// External DNS domain captured at completion
    pub fn external_dns_domain(&self) -> Option<&str> {
        self.external_dns_domain.as_deref()
    }
}

impl PlatformValidator for RawCreateOptions {
    type Completer = ValidatedCreateOptions;

    fn validate(self, _opts: &CreateOptions) -> Result<ValidatedCreateOptions> {
        validate_project_id(&self.project).map_err(Error::InvalidProject)?;
        validate_region(&self.region).map_err(Error::InvalidRegion)?;

        Ok(ValidatedCreateOptions { raw: self })
    }
}

impl PlatformCompleter for ValidatedCreateOptions {
    type Platform = CompletedCreateOptions;

    fn complete(self, opts: &CreateOptions) -> Result<CompletedCreateOptions> {
        Ok(CompletedCreateOptions {
            validated: self,
            name: opts.name.clone(),
            namespace: opts.namespace.clone(),
            external_dns_domain: opts.external_dns_domain.clone(),
        })
    }
}

impl Platform for CompletedCreateOptions {
    fn apply_platform_specifics(&self, hosted_cluster: &mut HostedCluster) -> Result<()> {
        hosted_cluster.spec.platform.type_ = PlatformType::Gcp;
        hosted_cluster.spec.platform.gcp = Some(GcpPlatformSpec {
            project: self.project().to_string(),
            region: self.region().to_string(),
        });
        Ok(())
    }

    fn generate_node_pools(&self, constructor: DefaultNodePoolConstructor<'_>) -> Vec<NodePool> {
        vec![constructor(PlatformType::Gcp, "")]
    }

    fn generate_resources(&self) -> Result<Vec<DynamicObject>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{NodePoolPlatform, NodePoolSpec};
    use rstest::rstest;
    use std::cell::RefCell;

    fn raw(project: &str, region: &str) -> RawCreateOptions {
        RawCreateOptions {
            project: project.to_string(),
            region: region.to_string(),
        }
    }

    fn core_options() -> CreateOptions {
        CreateOptions {
            name: "example".to_string(),
            namespace: "clusters".to_string(),
            external_dns_domain: Some("service.example.com".to_string()),
            ..CreateOptions::default()
        }
    }

    fn completed(project: &str, region: &str) -> CompletedCreateOptions {
        let opts = core_options();
        raw(project, region)
            .validate(&opts)
            .expect("valid options should validate")
            .complete(&opts)
            .expect("complete never fails")
    }

    fn node_pool_for(platform_type: PlatformType, arch: &str) -> NodePool {
        NodePool::new(
            "example",
            NodePoolSpec {
                platform: NodePoolPlatform {
                    type_: platform_type,
                },
                arch: arch.to_string(),
                ..Default::default()
            },
        )
    }

    // =========================================================================
    // Validate
    // =========================================================================

    #[test]
    fn default_options_are_empty() {
        let opts = crate::platform::gcp::default_options();
        assert_eq!(opts, RawCreateOptions::default());
        assert_eq!(opts.project, "");
        assert_eq!(opts.region, "");
    }

    #[test]
    fn validate_wraps_raw_options_unchanged() {
        let validated = raw("my-project-123", "us-central1")
            .validate(&CreateOptions::default())
            .expect("valid options should validate");
        assert_eq!(validated.project(), "my-project-123");
        assert_eq!(validated.region(), "us-central1");
    }

    #[rstest]
    #[case::invalid_project("bad_project", "us-central1")]
    #[case::empty_project("", "us-central1")]
    fn validate_rejects_bad_project(#[case] project: &str, #[case] region: &str) {
        let err = raw(project, region)
            .validate(&CreateOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidProject(_)));
        assert!(err.to_string().starts_with("invalid project identifier: "));
    }

    #[rstest]
    #[case::invalid_region("my-project-123", "invalid-region")]
    #[case::empty_region("my-project-123", "")]
    fn validate_rejects_bad_region(#[case] project: &str, #[case] region: &str) {
        let err = raw(project, region)
            .validate(&CreateOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRegion(_)));
        assert!(err.to_string().starts_with("invalid region: "));
    }

    #[test]
    fn validate_reports_project_before_region() {
        let err = raw("", "").validate(&CreateOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidProject(_)));
    }

    #[test]
    fn validate_ignores_generic_options() {
        let opts = CreateOptions {
            name: String::new(),
            ..CreateOptions::default()
        };
        assert!(raw("my-project-123", "us-central1").validate(&opts).is_ok());
    }

    // =========================================================================
    // Complete
    // =========================================================================

    #[test]
    fn complete_captures_cluster_identity() {
        let opts = completed("my-project-123", "us-central1");
        assert_eq!(opts.name(), "example");
        assert_eq!(opts.namespace(), "clusters");
        assert_eq!(opts.external_dns_domain(), Some("service.example.com"));
        assert_eq!(opts.project(), "my-project-123");
        assert_eq!(opts.region(), "us-central1");
    }

    #[test]
    fn complete_copies_identity_at_completion_time() {
        let mut core = core_options();
        let validated = raw("my-project-123", "us-central1")
            .validate(&core)
            .expect("valid options should validate");

        core.name = "renamed".to_string();
        let opts = validated.complete(&core).expect("complete never fails");
        core.name = "changed-after".to_string();

        assert_eq!(opts.name(), "renamed");
        assert_ne!(opts.name(), core.name);
    }

    #[test]
    fn complete_without_external_dns_domain() {
        let core = CreateOptions::default();
        let opts = raw("my-project-123", "us-central1")
            .validate(&core)
            .and_then(|v| v.complete(&core))
            .expect("pipeline should succeed");
        assert_eq!(opts.external_dns_domain(), None);
    }

    // =========================================================================
    // Platform surface
    // =========================================================================

    #[test]
    fn apply_platform_specifics_sets_gcp_stanza() {
        let opts = completed("test-project-123", "us-central1");
        let mut hosted_cluster = HostedCluster::new("example", Default::default());

        opts.apply_platform_specifics(&mut hosted_cluster)
            .expect("applying GCP specifics should succeed");

        assert_eq!(hosted_cluster.spec.platform.type_, PlatformType::Gcp);
        let gcp = hosted_cluster
            .spec
            .platform
            .gcp
            .expect("GCP platform spec should be set");
        assert_eq!(gcp.project, "test-project-123");
        assert_eq!(gcp.region, "us-central1");
    }

    #[test]
    fn apply_platform_specifics_overwrites_previous_platform() {
        let opts = completed("test-project-123", "us-central1");
        let mut hosted_cluster = HostedCluster::new("example", Default::default());
        hosted_cluster.spec.platform.type_ = PlatformType::Aws;

        opts.apply_platform_specifics(&mut hosted_cluster)
            .expect("applying GCP specifics should succeed");

        assert_eq!(hosted_cluster.spec.platform.type_, PlatformType::Gcp);
    }

    #[test]
    fn generate_node_pools_calls_constructor_once() {
        let opts = completed("test-project-123", "us-central1");
        let calls = RefCell::new(Vec::new());
        let constructor = |platform_type: PlatformType, arch: &str| {
            calls.borrow_mut().push((platform_type, arch.to_string()));
            node_pool_for(platform_type, arch)
        };

        let node_pools = opts.generate_node_pools(&constructor);

        assert_eq!(node_pools.len(), 1);
        assert_eq!(node_pools[0].spec.platform.type_, PlatformType::Gcp);
        assert_eq!(
            calls.into_inner(),
            vec![(PlatformType::Gcp, String::new())]
        );
    }

    #[test]
    fn generate_resources_is_empty() {
        let opts = completed("test-project-123", "us-central1");
        let resources = opts
            .generate_resources()
            .expect("generating resources should succeed");
        assert!(resources.is_empty());
    }
}

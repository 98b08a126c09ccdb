//! Generic hosted cluster creation
//!
//! This module owns the platform-independent half of `create cluster`. A
//! platform plugs in through three traits, one per stage:
//!
//! - [`PlatformValidator`] - raw flags, validated into a completer
//! - [`PlatformCompleter`] - validated flags, completed with cluster identity
//! - [`Platform`] - the finished options, which decorate the rendered resources
//!
//! [`create_cluster`] drives the stages in order and only ever sees the
//! finished platform as `&dyn Platform`.
//!
//! # Example
//!
//! ```ignore
//! let opts = CreateOptions::default();
//! let gcp = RawCreateOptions { project: "my-project-123".into(), region: "us-central1".into() };
//! let manifests = create_cluster(&opts, gcp)?;
//! println!("{}", manifests.to_yaml()?);
//! ```

mod manifests;
mod options;

pub use manifests::{
    base_hosted_cluster, default_node_pool, generate_infra_id, namespace, service_publishing,
    write_manifests, Manifests,
};
pub use options::{
    CreateOptions, DEFAULT_ARCH, DEFAULT_CLUSTER_CIDR, DEFAULT_NAME, DEFAULT_NAMESPACE,
    DEFAULT_NETWORK_TYPE, DEFAULT_NODE_POOL_REPLICAS, DEFAULT_RELEASE_IMAGE,
    DEFAULT_SERVICE_CIDR, MAX_CLUSTER_NAME_LEN,
};

use kube::core::DynamicObject;
use tracing::{debug, info};

use crate::crd::{HostedCluster, NodePool, PlatformType};
use crate::Result;

/// Builds the default NodePool for a platform and architecture
///
/// An empty architecture means "use the cluster default".
pub type DefaultNodePoolConstructor<'a> = &'a dyn Fn(PlatformType, &str) -> NodePool;

/// First stage: raw platform flags
pub trait PlatformValidator {
    /// Stage produced by a successful validation
    type Completer: PlatformCompleter;

    /// Validate the platform flags
    ///
    /// Either every check passes and the flags move into the next stage, or
    /// an error is returned and nothing is produced.
    fn validate(self, opts: &CreateOptions) -> Result<Self::Completer>;
}

/// Second stage: validated platform flags
pub trait PlatformCompleter {
    /// Finished platform produced by completion
    type Platform: Platform;

    /// Capture whatever the platform needs from the final cluster identity
    fn complete(self, opts: &CreateOptions) -> Result<Self::Platform>;
}

/// A finished platform, ready to decorate the rendered resources
pub trait Platform {
    /// Fill in the platform stanza of the HostedCluster
    fn apply_platform_specifics(&self, hosted_cluster: &mut HostedCluster) -> Result<()>;

    /// Default worker pools for this platform
    fn generate_node_pools(&self, constructor: DefaultNodePoolConstructor<'_>) -> Vec<NodePool>;

    /// Extra resources beyond the HostedCluster and NodePools
    fn generate_resources(&self) -> Result<Vec<DynamicObject>>;
}

/// Run the full create pipeline and return the resources to render
pub fn create_cluster<V: PlatformValidator>(opts: &CreateOptions, validator: V) -> Result<Manifests> {
    opts.validate()?;

    info!(cluster = %opts.name, namespace = %opts.namespace, "Validating platform options");
    let completer = validator.validate(opts)?;

    let platform = completer.complete(opts)?;
    info!(cluster = %opts.name, "Platform options complete");

    let infra_id = opts
        .infra_id
        .clone()
        .unwrap_or_else(|| generate_infra_id(&opts.name));
    build_manifests(opts, &infra_id, &platform)
}

/// Assemble every resource for a completed platform
pub fn build_manifests(
    opts: &CreateOptions,
    infra_id: &str,
    platform: &dyn Platform,
) -> Result<Manifests> {
    let mut hosted_cluster = base_hosted_cluster(opts, infra_id)?;
    platform.apply_platform_specifics(&mut hosted_cluster)?;
    info!(
        cluster = %opts.name,
        platform = %hosted_cluster.spec.platform.type_,
        "Applied platform specifics"
    );

    let constructor =
        |platform_type: PlatformType, arch: &str| default_node_pool(opts, platform_type, arch);
    let node_pools = platform.generate_node_pools(&constructor);
    let resources = platform.generate_resources()?;

    let manifests = Manifests {
        namespace: namespace(opts),
        hosted_cluster,
        node_pools,
        resources,
    };
    debug!(
        cluster = %opts.name,
        infra_id = %infra_id,
        documents = manifests.len(),
        "Built cluster manifests"
    );
    Ok(manifests)
}

/// Create a cluster and write its manifests
///
/// Manifests go to `--render-into` when set, otherwise to stdout.
pub async fn render_cluster<V: PlatformValidator>(opts: &CreateOptions, validator: V) -> Result<()> {
    let manifests = create_cluster(opts, validator)?;
    let yaml = manifests.to_yaml()?;
    write_manifests(&yaml, opts.render_into.as_deref()).await?;

    if let Some(path) = &opts.render_into {
        info!(cluster = %opts.name, path = %path.display(), "Rendered cluster manifests");
    }
    Ok(())
}

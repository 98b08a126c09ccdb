//! Platform-independent create options

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use clap::Args;
use regex::Regex;

use crate::{Error, Result};

/// Default HostedCluster name
pub const DEFAULT_NAME: &str = "example";
/// Default namespace for HostedClusters and NodePools
pub const DEFAULT_NAMESPACE: &str = "clusters";
/// Default release payload
pub const DEFAULT_RELEASE_IMAGE: &str = "quay.io/openshift-release-dev/ocp-release:4.19.0-multi";
/// Default NodePool replica count
pub const DEFAULT_NODE_POOL_REPLICAS: i32 = 2;
/// Default worker architecture
pub const DEFAULT_ARCH: &str = "amd64";
/// Default CNI plugin
pub const DEFAULT_NETWORK_TYPE: &str = "OVNKubernetes";
/// Default pod network
pub const DEFAULT_CLUSTER_CIDR: &str = "10.132.0.0/14";
/// Default service network
pub const DEFAULT_SERVICE_CIDR: &str = "172.31.0.0/16";

/// Longest HostedCluster name accepted
///
/// Names are embedded in generated resource names and route hostnames.
pub const MAX_CLUSTER_NAME_LEN: usize = 40;

const MAX_NAMESPACE_LEN: usize = 63;
const SUPPORTED_ARCHES: &[&str] = &["amd64", "arm64"];

static DNS_LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS label pattern is a valid regex")
});

/// Options shared by every platform
///
/// This is the generic creation context handed to each platform's
/// validate and complete stages.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct CreateOptions {
    /// Name of the HostedCluster
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Namespace for the HostedCluster and its NodePools
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Base domain for cluster DNS records
    #[arg(long, default_value = "")]
    pub base_domain: String,

    /// Publish control plane services as routes under this domain
    #[arg(long)]
    pub external_dns_domain: Option<String>,

    /// Release payload for the control plane and workers
    #[arg(long, env = "LATTICE_HCP_RELEASE_IMAGE", default_value = DEFAULT_RELEASE_IMAGE)]
    pub release_image: String,

    /// Infrastructure ID (generated from the name when omitted)
    #[arg(long)]
    pub infra_id: Option<String>,

    /// Replicas of the default NodePool
    #[arg(long, default_value_t = DEFAULT_NODE_POOL_REPLICAS, allow_negative_numbers = true)]
    pub node_pool_replicas: i32,

    /// Worker architecture when the platform does not choose one
    #[arg(long, default_value = DEFAULT_ARCH)]
    pub arch: String,

    /// CNI plugin for the hosted cluster
    #[arg(long, default_value = DEFAULT_NETWORK_TYPE)]
    pub network_type: String,

    /// Pod network CIDR
    #[arg(long, default_value = DEFAULT_CLUSTER_CIDR)]
    pub cluster_cidr: String,

    /// Service network CIDR
    #[arg(long, default_value = DEFAULT_SERVICE_CIDR)]
    pub service_cidr: String,

    /// Annotations for the HostedCluster (repeatable)
    #[arg(long = "annotations", value_name = "KEY=VALUE")]
    pub annotations: Vec<String>,

    /// Write rendered manifests to this file instead of stdout
    #[arg(long)]
    pub render_into: Option<PathBuf>,

    /// Abort if writing the manifests takes longer than this many seconds (0 disables it)
    #[arg(long = "timeout", default_value_t = 0)]
    pub timeout_secs: u64,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            base_domain: String::new(),
            external_dns_domain: None,
            release_image: DEFAULT_RELEASE_IMAGE.to_string(),
            infra_id: None,
            node_pool_replicas: DEFAULT_NODE_POOL_REPLICAS,
            arch: DEFAULT_ARCH.to_string(),
            network_type: DEFAULT_NETWORK_TYPE.to_string(),
            cluster_cidr: DEFAULT_CLUSTER_CIDR.to_string(),
            service_cidr: DEFAULT_SERVICE_CIDR.to_string(),
            annotations: Vec::new(),
            render_into: None,
            timeout_secs: 0,
        }
    }
}

impl CreateOptions {
    /// Validate the platform-independent options
    pub fn validate(&self) -> Result<()> {
        validate_dns_label("--name", &self.name, MAX_CLUSTER_NAME_LEN)?;
        validate_dns_label("--namespace", &self.namespace, MAX_NAMESPACE_LEN)?;

        if self.node_pool_replicas < 0 {
            return Err(Error::validation(format!(
                "--node-pool-replicas must not be negative, got {}",
                self.node_pool_replicas
            )));
        }

        if !SUPPORTED_ARCHES.contains(&self.arch.as_str()) {
            return Err(Error::validation(format!(
                "--arch {} is not supported, expected one of: {}",
                self.arch,
                SUPPORTED_ARCHES.join(", ")
            )));
        }

        if self.release_image.is_empty() {
            return Err(Error::validation("--release-image cannot be empty"));
        }

        if self.infra_id.as_deref() == Some("") {
            return Err(Error::validation("--infra-id cannot be empty"));
        }

        self.parsed_annotations()?;
        Ok(())
    }

    /// Annotations as a map
    ///
    /// Later duplicates of a key win.
    pub fn parsed_annotations(&self) -> Result<BTreeMap<String, String>> {
        self.annotations
            .iter()
            .map(|entry| match entry.split_once('=') {
                Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
                _ => Err(Error::validation(format!(
                    "--annotations {entry} must be in the form key=value"
                ))),
            })
            .collect()
    }

    /// Deadline for writing the manifests, if one was requested
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn validate_dns_label(flag: &str, value: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{flag} cannot be empty")));
    }
    if value.len() > max_len {
        return Err(Error::validation(format!(
            "{flag} {value} must be at most {max_len} characters"
        )));
    }
    if !DNS_LABEL_PATTERN.is_match(value) {
        return Err(Error::validation(format!(
            "{flag} {value} must consist of lowercase alphanumeric characters or '-', and start and end with an alphanumeric character"
        )));
    }
    Ok(())
}

//! NodePool Custom Resource Definition
//!
//! A NodePool is a scalable set of worker machines attached to a
//! HostedCluster.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{PlatformType, Release};

/// Specification for a NodePool
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "hypershift.openshift.io",
    version = "v1beta1",
    kind = "NodePool",
    plural = "nodepools",
    shortname = "np",
    namespaced,
    printcolumn = r#"{"name":"Cluster","type":"string","jsonPath":".spec.clusterName"}"#,
    printcolumn = r#"{"name":"Replicas","type":"integer","jsonPath":".spec.replicas"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolSpec {
    /// Name of the HostedCluster this pool belongs to
    pub cluster_name: String,

    /// Desired number of workers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Upgrade and repair behaviour
    pub management: NodePoolManagement,

    /// Platform the workers run on
    pub platform: NodePoolPlatform,

    /// CPU architecture of the workers (e.g., "amd64")
    pub arch: String,

    /// Release payload the workers run
    pub release: Release,
}

/// Upgrade and repair behaviour of a NodePool
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolManagement {
    /// How machines are upgraded
    pub upgrade_type: UpgradeType,

    /// Replace unhealthy machines automatically
    #[serde(default)]
    pub auto_repair: bool,
}

/// NodePool upgrade strategy
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum UpgradeType {
    /// Replace machines with new ones on upgrade
    #[default]
    Replace,
    /// Upgrade machines in place
    InPlace,
}

/// Platform stanza of a NodePool
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct NodePoolPlatform {
    /// Platform the workers run on
    #[serde(rename = "type")]
    pub type_: PlatformType,
}

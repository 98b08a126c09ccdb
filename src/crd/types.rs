//! Supporting types shared by HostedCluster and NodePool

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Infrastructure platform a hosted cluster runs on
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum PlatformType {
    /// Amazon Web Services
    #[serde(rename = "AWS")]
    Aws,
    /// Microsoft Azure
    Azure,
    /// Google Cloud Platform
    #[serde(rename = "GCP")]
    Gcp,
    /// KubeVirt virtual machines on the management cluster
    KubeVirt,
    /// OpenStack private cloud
    OpenStack,
    /// Agent-based bare metal
    Agent,
    /// No platform integration
    #[default]
    None,
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aws => write!(f, "AWS"),
            Self::Azure => write!(f, "Azure"),
            Self::Gcp => write!(f, "GCP"),
            Self::KubeVirt => write!(f, "KubeVirt"),
            Self::OpenStack => write!(f, "OpenStack"),
            Self::Agent => write!(f, "Agent"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Platform stanza of a HostedCluster
///
/// `type` selects the platform; at most one of the nested platform specs is
/// populated and it must match `type`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct PlatformSpec {
    /// Platform the cluster runs on
    #[serde(rename = "type")]
    pub type_: PlatformType,

    /// GCP-specific configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpPlatformSpec>,
}

/// GCP platform configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct GcpPlatformSpec {
    /// GCP project ID that owns the cluster's infrastructure
    pub project: String,

    /// GCP region the cluster runs in (e.g., "us-central1")
    pub region: String,
}

/// Release payload reference
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct Release {
    /// Pull spec of the release image
    pub image: String,
}

/// Reference to an object in the same namespace
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct LocalObjectReference {
    /// Name of the referenced object
    pub name: String,
}

//! HostedCluster Custom Resource Definition
//!
//! A HostedCluster is a cluster whose control plane runs as pods on a
//! management cluster. Workers are provided separately by NodePools.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{LocalObjectReference, PlatformSpec, Release};

/// Specification for a HostedCluster
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "hypershift.openshift.io",
    version = "v1beta1",
    kind = "HostedCluster",
    plural = "hostedclusters",
    shortname = "hc",
    namespaced,
    printcolumn = r#"{"name":"Platform","type":"string","jsonPath":".spec.platform.type"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct HostedClusterSpec {
    /// Release payload the control plane runs
    pub release: Release,

    /// Secret holding the image pull secret for the release payload
    pub pull_secret: LocalObjectReference,

    /// DNS configuration
    pub dns: DnsSpec,

    /// Cluster networking
    pub networking: ClusterNetworking,

    /// Infrastructure platform (populated by the platform implementation)
    pub platform: PlatformSpec,

    /// Unique identifier used to tag cloud infrastructure
    #[serde(rename = "infraID")]
    pub infra_id: String,

    /// How each control plane service is exposed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServicePublishingStrategyMapping>,
}

/// DNS configuration for a hosted cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsSpec {
    /// Base domain for cluster DNS records
    pub base_domain: String,
}

/// Cluster networking configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworking {
    /// CNI plugin (e.g., "OVNKubernetes")
    pub network_type: String,

    /// Pod network CIDRs
    pub cluster_network: Vec<NetworkEntry>,

    /// Service network CIDRs
    pub service_network: Vec<NetworkEntry>,
}

/// A single CIDR entry
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct NetworkEntry {
    /// CIDR block (e.g., "10.132.0.0/14")
    pub cidr: String,
}

/// Control plane service exposed by a hosted cluster
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ServiceType {
    /// Kubernetes API server
    #[serde(rename = "APIServer")]
    ApiServer,
    /// OAuth server
    #[serde(rename = "OAuthServer")]
    OAuthServer,
    /// Konnectivity tunnel
    Konnectivity,
    /// Ignition config server
    Ignition,
}

impl ServiceType {
    /// Hostname prefix used when the service is published as a route
    pub fn hostname_prefix(&self) -> &'static str {
        match self {
            Self::ApiServer => "api",
            Self::OAuthServer => "oauth",
            Self::Konnectivity => "konnectivity",
            Self::Ignition => "ignition",
        }
    }
}

/// Publishing strategy for one control plane service
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePublishingStrategyMapping {
    /// Service being published
    pub service: ServiceType,

    /// How it is published
    pub service_publishing_strategy: ServicePublishingStrategy,
}

/// Publishing strategy details
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ServicePublishingStrategy {
    /// Publishing type
    #[serde(rename = "type")]
    pub type_: PublishingStrategyType,

    /// Route configuration when `type` is Route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RoutePublishingStrategy>,
}

/// Publishing strategy type
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum PublishingStrategyType {
    /// Cloud load balancer service
    LoadBalancer,
    /// OpenShift route on the management cluster
    Route,
}

/// Route publishing details
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct RoutePublishingStrategy {
    /// External hostname served by the route
    pub hostname: String,
}

impl ServicePublishingStrategyMapping {
    /// Publish a service through a cloud load balancer
    pub fn load_balancer(service: ServiceType) -> Self {
        Self {
            service,
            service_publishing_strategy: ServicePublishingStrategy {
                type_: PublishingStrategyType::LoadBalancer,
                route: None,
            },
        }
    }

    /// Publish a service through a route, optionally with a fixed hostname
    pub fn route(service: ServiceType, hostname: Option<String>) -> Self {
        Self {
            service,
            service_publishing_strategy: ServicePublishingStrategy {
                type_: PublishingStrategyType::Route,
                route: hostname.map(|hostname| RoutePublishingStrategy { hostname }),
            },
        }
    }
}

//! Custom Resource Definitions for hosted clusters
//!
//! These are the resources the create command renders. Platform
//! implementations only touch the `platform` stanzas.

mod hosted_cluster;
mod node_pool;
mod types;

pub use hosted_cluster::{
    ClusterNetworking, DnsSpec, HostedCluster, HostedClusterSpec, NetworkEntry,
    PublishingStrategyType, RoutePublishingStrategy, ServicePublishingStrategy,
    ServicePublishingStrategyMapping, ServiceType,
};
pub use node_pool::{NodePool, NodePoolManagement, NodePoolPlatform, NodePoolSpec, UpgradeType};
pub use types::{GcpPlatformSpec, LocalObjectReference, PlatformSpec, PlatformType, Release};

//! Manifest construction and rendering
//!
//! Builds the platform-independent parts of the HostedCluster and NodePools
//! and renders everything as a multi-document YAML stream.

use std::path::Path;

use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::DynamicObject;
use rand::Rng;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::CreateOptions;
use crate::crd::{
    ClusterNetworking, DnsSpec, HostedCluster, HostedClusterSpec, LocalObjectReference,
    NetworkEntry, NodePool, NodePoolManagement, NodePoolPlatform, NodePoolSpec, PlatformType,
    Release, ServicePublishingStrategyMapping, ServiceType, UpgradeType,
};
use crate::{Error, Result};

/// Characters used for generated infra ID suffixes (no vowels, no look-alikes)
const INFRA_ID_ALPHABET: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";
const INFRA_ID_SUFFIX_LEN: usize = 5;

/// Every resource rendered for one hosted cluster
#[derive(Clone, Debug)]
pub struct Manifests {
    /// Namespace holding the HostedCluster
    pub namespace: Namespace,
    /// The HostedCluster itself
    pub hosted_cluster: HostedCluster,
    /// Worker pools
    pub node_pools: Vec<NodePool>,
    /// Extra platform resources
    pub resources: Vec<DynamicObject>,
}

impl Manifests {
    /// Number of documents that will be rendered
    pub fn len(&self) -> usize {
        2 + self.node_pools.len() + self.resources.len()
    }

    /// Always false: a namespace and HostedCluster are always present
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Render all resources as a multi-document YAML stream
    ///
    /// Order: Namespace, HostedCluster, NodePools, platform resources.
    pub fn to_yaml(&self) -> Result<String> {
        let mut documents = vec![to_document(&self.namespace)?, to_document(&self.hosted_cluster)?];
        for node_pool in &self.node_pools {
            documents.push(to_document(node_pool)?);
        }
        for resource in &self.resources {
            documents.push(to_document(resource)?);
        }
        Ok(documents.join("---\n"))
    }
}

fn to_document<T: Serialize>(resource: &T) -> Result<String> {
    serde_yaml::to_string(resource).map_err(|e| Error::serialization(e.to_string()))
}

/// Write rendered manifests to a file, or to stdout when no path is given
pub async fn write_manifests(yaml: &str, render_into: Option<&Path>) -> Result<()> {
    match render_into {
        Some(path) => tokio::fs::write(path, yaml).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(yaml.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

/// Generate an infra ID of the form `<name>-<5 random characters>`
pub fn generate_infra_id(name: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..INFRA_ID_SUFFIX_LEN)
        .map(|_| INFRA_ID_ALPHABET[rng.gen_range(0..INFRA_ID_ALPHABET.len())] as char)
        .collect();
    format!("{name}-{suffix}")
}

/// Namespace the cluster's resources live in
pub fn namespace(opts: &CreateOptions) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(opts.namespace.clone()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// HostedCluster with everything but the platform stanza filled in
pub fn base_hosted_cluster(opts: &CreateOptions, infra_id: &str) -> Result<HostedCluster> {
    let annotations = opts.parsed_annotations()?;

    let mut hosted_cluster = HostedCluster::new(
        &opts.name,
        HostedClusterSpec {
            release: Release {
                image: opts.release_image.clone(),
            },
            pull_secret: LocalObjectReference {
                name: format!("{}-pull-secret", opts.name),
            },
            dns: DnsSpec {
                base_domain: opts.base_domain.clone(),
            },
            networking: ClusterNetworking {
                network_type: opts.network_type.clone(),
                cluster_network: vec![NetworkEntry {
                    cidr: opts.cluster_cidr.clone(),
                }],
                service_network: vec![NetworkEntry {
                    cidr: opts.service_cidr.clone(),
                }],
            },
            platform: Default::default(),
            infra_id: infra_id.to_string(),
            services: service_publishing(opts),
        },
    );
    hosted_cluster.metadata.namespace = Some(opts.namespace.clone());
    if !annotations.is_empty() {
        hosted_cluster.metadata.annotations = Some(annotations);
    }

    Ok(hosted_cluster)
}

/// Publishing strategy for each control plane service
///
/// With an external DNS domain every service gets a route hostname under
/// that domain. Without one the API server sits behind a load balancer and
/// the rest use routes with generated hostnames.
pub fn service_publishing(opts: &CreateOptions) -> Vec<ServicePublishingStrategyMapping> {
    const SERVICES: [ServiceType; 4] = [
        ServiceType::ApiServer,
        ServiceType::OAuthServer,
        ServiceType::Konnectivity,
        ServiceType::Ignition,
    ];

    match opts.external_dns_domain.as_deref() {
        Some(domain) => SERVICES
            .iter()
            .map(|&service| {
                let hostname = format!("{}-{}.{}", service.hostname_prefix(), opts.name, domain);
                ServicePublishingStrategyMapping::route(service, Some(hostname))
            })
            .collect(),
        None => SERVICES
            .iter()
            .map(|&service| match service {
                ServiceType::ApiServer => ServicePublishingStrategyMapping::load_balancer(service),
                _ => ServicePublishingStrategyMapping::route(service, None),
            })
            .collect(),
    }
}

/// Default NodePool for a platform
///
/// An empty `arch` falls back to the `--arch` flag.
pub fn default_node_pool(opts: &CreateOptions, platform_type: PlatformType, arch: &str) -> NodePool {
    let arch = if arch.is_empty() { &opts.arch } else { arch };

    let mut node_pool = NodePool::new(
        &opts.name,
        NodePoolSpec {
            cluster_name: opts.name.clone(),
            replicas: Some(opts.node_pool_replicas),
            management: NodePoolManagement {
                upgrade_type: UpgradeType::Replace,
                auto_repair: false,
            },
            platform: NodePoolPlatform {
                type_: platform_type,
            },
            arch: arch.to_string(),
            release: Release {
                image: opts.release_image.clone(),
            },
        },
    );
    node_pool.metadata.namespace = Some(opts.namespace.clone());
    node_pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CreateOptions {
        CreateOptions {
            name: "example".to_string(),
            base_domain: "example.com".to_string(),
            annotations: vec!["team=platform".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn base_hosted_cluster_from_options() {
        let hc = base_hosted_cluster(&options(), "example-bcdfg").expect("should build");

        assert_eq!(hc.metadata.name.as_deref(), Some("example"));
        assert_eq!(hc.metadata.namespace.as_deref(), Some("clusters"));
        assert_eq!(
            hc.metadata.annotations.as_ref().and_then(|a| a.get("team")),
            Some(&"platform".to_string())
        );
        assert_eq!(hc.spec.infra_id, "example-bcdfg");
        assert_eq!(hc.spec.pull_secret.name, "example-pull-secret");
        assert_eq!(hc.spec.dns.base_domain, "example.com");
        assert_eq!(hc.spec.networking.network_type, "OVNKubernetes");
        assert_eq!(hc.spec.networking.cluster_network[0].cidr, "10.132.0.0/14");
        assert_eq!(hc.spec.networking.service_network[0].cidr, "172.31.0.0/16");
        assert_eq!(hc.spec.platform.type_, PlatformType::None);
        assert!(hc.spec.platform.gcp.is_none());
    }

    #[test]
    fn no_annotations_leaves_metadata_unset() {
        let opts = CreateOptions::default();
        let hc = base_hosted_cluster(&opts, "example-bcdfg").expect("should build");
        assert!(hc.metadata.annotations.is_none());
    }

    #[test]
    fn services_without_external_dns() {
        let services = service_publishing(&CreateOptions::default());
        assert_eq!(services.len(), 4);
        assert_eq!(
            services[0],
            ServicePublishingStrategyMapping::load_balancer(ServiceType::ApiServer)
        );
        assert!(services[1..]
            .iter()
            .all(|s| s.service_publishing_strategy.route.is_none()));
    }

    #[test]
    fn services_with_external_dns_use_hostnames() {
        let opts = CreateOptions {
            external_dns_domain: Some("service.example.com".to_string()),
            ..Default::default()
        };
        let hostnames: Vec<_> = service_publishing(&opts)
            .into_iter()
            .filter_map(|s| s.service_publishing_strategy.route.map(|r| r.hostname))
            .collect();
        assert_eq!(
            hostnames,
            vec![
                "api-example.service.example.com",
                "oauth-example.service.example.com",
                "konnectivity-example.service.example.com",
                "ignition-example.service.example.com",
            ]
        );
    }

    #[test]
    fn default_node_pool_uses_cluster_identity() {
        let np = default_node_pool(&options(), PlatformType::Gcp, "");

        assert_eq!(np.metadata.name.as_deref(), Some("example"));
        assert_eq!(np.metadata.namespace.as_deref(), Some("clusters"));
        assert_eq!(np.spec.cluster_name, "example");
        assert_eq!(np.spec.replicas, Some(2));
        assert_eq!(np.spec.platform.type_, PlatformType::Gcp);
        assert_eq!(np.spec.arch, "amd64");
        assert_eq!(np.spec.management.upgrade_type, UpgradeType::Replace);
    }

    #[test]
    fn default_node_pool_keeps_explicit_arch() {
        let np = default_node_pool(&options(), PlatformType::Aws, "arm64");
        assert_eq!(np.spec.arch, "arm64");
    }

    #[test]
    fn generated_infra_id_has_random_suffix() {
        let infra_id = generate_infra_id("example");
        let suffix = infra_id
            .strip_prefix("example-")
            .expect("infra ID should start with the cluster name");
        assert_eq!(suffix.len(), INFRA_ID_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| INFRA_ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn yaml_stream_orders_documents() {
        let opts = options();
        let manifests = Manifests {
            namespace: namespace(&opts),
            hosted_cluster: base_hosted_cluster(&opts, "example-bcdfg").expect("should build"),
            node_pools: vec![default_node_pool(&opts, PlatformType::Gcp, "")],
            resources: Vec::new(),
        };
        assert_eq!(manifests.len(), 3);

        let yaml = manifests.to_yaml().expect("should render");
        let kinds: Vec<_> = yaml
            .split("---\n")
            .map(|doc| {
                let value: serde_yaml::Value = serde_yaml::from_str(doc).expect("valid document");
                value["kind"].as_str().unwrap_or_default().to_string()
            })
            .collect();
        assert_eq!(kinds, vec!["Namespace", "HostedCluster", "NodePool"]);
    }

    #[tokio::test]
    async fn write_manifests_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("manifests.yaml");

        write_manifests("kind: Namespace\n", Some(&path))
            .await
            .expect("write should succeed");

        let written = tokio::fs::read_to_string(&path).await.expect("read back");
        assert_eq!(written, "kind: Namespace\n");
    }

    #[tokio::test]
    async fn write_manifests_to_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("manifests.yaml");

        let err = write_manifests("kind: Namespace\n", Some(&path))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

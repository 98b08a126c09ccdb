//! `create` commands

use clap::{Args, Subcommand};
use tracing::error;

use crate::cluster::{render_cluster, CreateOptions, PlatformValidator};
use crate::platform::gcp;
use crate::{Error, Result};

/// Resources that can be created
#[derive(Subcommand, Debug)]
pub enum CreateCommands {
    /// Create a hosted cluster
    #[command(subcommand)]
    Cluster(ClusterCommands),
}

/// Platforms a hosted cluster can be created on
#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// Creates basic functional HostedCluster resources on GCP
    Gcp(GcpArgs),
}

/// Arguments for `create cluster gcp`
#[derive(Args, Debug)]
pub struct GcpArgs {
    #[command(flatten)]
    pub core: CreateOptions,

    #[command(flatten)]
    pub gcp: gcp::RawCreateOptions,
}

/// Run a `create` subcommand
pub async fn run(cmd: CreateCommands) -> Result<()> {
    match cmd {
        CreateCommands::Cluster(ClusterCommands::Gcp(args)) => {
            create_cluster(&args.core, args.gcp).await
        }
    }
}

async fn create_cluster<V: PlatformValidator>(opts: &CreateOptions, platform: V) -> Result<()> {
    let result = match opts.timeout() {
        Some(timeout) => tokio::time::timeout(timeout, render_cluster(opts, platform))
            .await
            .unwrap_or_else(|_| Err(Error::Timeout(timeout))),
        None => render_cluster(opts, platform).await,
    };

    if let Err(ref e) = result {
        error!(cluster = %opts.name, error = %e, "Failed to create cluster");
    }
    result
}

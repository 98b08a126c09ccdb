//! Lattice HCP - render hosted control plane clusters for cloud platforms
//!
//! `lattice-hcp create cluster <platform>` turns command-line flags into a
//! HostedCluster, its default NodePool and any platform extras, rendered as
//! YAML.
//!
//! # Architecture
//!
//! Platform flags move through sealed stages before they can touch a
//! resource:
//!
//! - raw flags are validated into a completer
//! - the completer captures the cluster identity and becomes a platform
//! - the platform decorates the generic resources built by [`cluster`]
//!
//! # Modules
//!
//! - [`cluster`] - Generic create pipeline and the platform traits
//! - [`platform`] - Platform implementations (GCP)
//! - [`crd`] - HostedCluster and NodePool resource types
//! - [`commands`] - clap command tree
//! - [`error`] - Error types

pub mod cluster;
pub mod commands;
pub mod crd;
pub mod error;
pub mod platform;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

use clap::{Parser, Subcommand};

/// Lattice HCP - hosted control plane cluster creation
#[derive(Parser, Debug)]
#[command(name = "lattice-hcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create resources
    #[command(subcommand)]
    Create(commands::create::CreateCommands),
}

impl Cli {
    /// Run the CLI command
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Create(cmd) => commands::create::run(cmd).await,
        }
    }
}

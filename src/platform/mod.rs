//! Platform implementations
//!
//! Each platform implements the staged [`PlatformValidator`] ->
//! [`PlatformCompleter`] -> [`Platform`] contract from [`crate::cluster`].
//!
//! # Supported Platforms
//!
//! - [`gcp`] - Google Cloud Platform
//!
//! [`PlatformValidator`]: crate::cluster::PlatformValidator
//! [`PlatformCompleter`]: crate::cluster::PlatformCompleter
//! [`Platform`]: crate::cluster::Platform

pub mod gcp;

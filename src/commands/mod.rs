//! CLI commands

pub mod create;

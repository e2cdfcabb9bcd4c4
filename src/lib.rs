//! devcontainer-utils turns a small declarative configuration into the files
//! a development container needs: build file, service composition, editor
//! descriptor, provisioning script and workspace descriptor.

/// Generated files, one pure generator per artifact
pub mod artifacts;

/// Command-line interface module for the devcontainer-utils binary
pub mod cli;

/// Configuration types, loading and validation
pub mod config;

/// Fixed names, paths and commands
pub mod constants;

/// Language project detection for `init`
pub mod discovery;

/// Error types and handling for devcontainer-utils
pub mod error;

/// Generation orchestration
pub mod generator;

/// Write-once user hook scripts
pub mod hooks;

/// Starter configuration from detected projects
pub mod init;

/// Logging setup and generation events
pub mod logger;

/// User input and interaction handling
pub mod prompt;

/// Waiting for provisioning to finish
pub mod ready;

/// Template rendering
pub mod renderer;

/// Mount placeholder resolution
pub mod resolve;

/// Configuration schema
pub mod schema;

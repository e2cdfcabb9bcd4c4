//! Error handling for devcontainer-utils.
//! Defines the error type and result alias used throughout the library.

use std::io;
use thiserror::Error;

/// Errors raised while loading a configuration or generating a devcontainer.
///
/// Every failure aborts the remaining generation steps; files already written
/// stay in place since regeneration is idempotent.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The configuration file is not valid JSON
    #[error("Failed to parse configuration file '{path}': {source}.")]
    ConfigParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration violates one or more schema rules. Every violation is listed.
    #[error("Invalid configuration: {}.", .violations.join("; "))]
    ValidationError { violations: Vec<String> },

    /// A folder path references a mount that was never declared
    #[error("Invalid mount reference: '{mount}' (folder: '{folder}').")]
    MountReferenceError { mount: String, folder: String },

    /// A mount expands to a path that holds another placeholder
    #[error("Mount '{mount}' expands to a path containing a placeholder (folder: '{folder}').")]
    NestedPlaceholderError { mount: String, folder: String },

    /// A sidecar image family without a service definition
    #[error("Unsupported sidecar: '{image}'.")]
    UnsupportedSidecarError { image: String },

    /// The JSON Schema used for validation could not be compiled
    #[error("Schema error: {0}.")]
    SchemaError(String),

    /// A placeholder pattern failed to compile
    #[error("Pattern error: {0}.")]
    PatternError(#[from] regex::Error),

    /// Represents errors raised by the template engine
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Serialization of the composition file failed
    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Serialization of a JSON descriptor failed
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Interactive input could not be read
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// `init` refuses to replace an existing configuration without force
    #[error("Configuration file '{path}' already exists. Use --force to replace it.")]
    ConfigExistsError { path: String },

    /// `init` found nothing to put in a configuration
    #[error("No projects detected under '{root}'.")]
    NoProjectsError { root: String },

    /// The readiness probe never succeeded within the configured bound
    #[error("Environment not ready after {attempts} attempts.")]
    ReadinessTimeoutError { attempts: u32 },

    /// The readiness wait was cancelled by its caller
    #[error("Waiting for the environment was cancelled.")]
    CancelledError,
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

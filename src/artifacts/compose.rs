//! Composition file generation.
//!
//! The primary `devcontainer` service mounts every configured host path at its
//! workspace path; each sidecar becomes an auxiliary service with fixed
//! development credentials.

use crate::config::{Config, Sidecar};
use crate::constants::{files, workspace_path, DEVCONTAINER_SERVICE};
use crate::error::{Error, Result};
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

/// Keeps the primary container alive so the editor can attach to it.
const IDLE_COMMAND: &str = "/bin/sh -c 'while sleep 1000; do :; done'";

/// Development-only password shared by the sidecar services.
const SIDECAR_PASSWORD: &str = "password";

#[derive(Debug, Serialize)]
pub struct Build {
    pub context: String,
    pub dockerfile: String,
}

/// A composition service. Fields are declared in key order.
#[derive(Debug, Default, Serialize)]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ComposeFile {
    pub services: BTreeMap<String, Service>,
    pub version: String,
}

/// Recognized sidecar image families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarKind {
    Redis,
    Postgres,
}

impl SidecarKind {
    pub fn from_image(image: &str) -> Option<Self> {
        match image {
            "redis" => Some(SidecarKind::Redis),
            "postgres" => Some(SidecarKind::Postgres),
            _ => None,
        }
    }

    /// Name of the composition service this sidecar becomes.
    pub fn service_name(&self) -> &'static str {
        match self {
            SidecarKind::Redis => "redis",
            SidecarKind::Postgres => "postgres",
        }
    }

    fn service(&self, sidecar: &Sidecar) -> Service {
        let image = Some(sidecar.to_string());
        match self {
            SidecarKind::Redis => Service {
                image,
                command: Some(format!("redis-server --requirepass {SIDECAR_PASSWORD}")),
                ..Default::default()
            },
            SidecarKind::Postgres => Service {
                image,
                environment: BTreeMap::from([
                    ("POSTGRES_DATABASE".to_string(), "postgres".to_string()),
                    ("POSTGRES_PASSWORD".to_string(), SIDECAR_PASSWORD.to_string()),
                    ("POSTGRES_USER".to_string(), "postgres".to_string()),
                ]),
                ..Default::default()
            },
        }
    }
}

/// Builds the composition document.
///
/// # Errors
/// * `Error::UnsupportedSidecarError` for an unknown image family
///
/// Sidecars of the same family share one service; the last one in sorted
/// order defines it.
pub fn build(config: &Config) -> Result<ComposeFile> {
    let volumes = config
        .mounts
        .iter()
        .map(|(name, host_path)| format!("{}:{}:cached", host_path, workspace_path(name, &[])))
        .collect();

    let devcontainer = Service {
        build: Some(Build { context: ".".to_string(), dockerfile: files::DOCKERFILE.to_string() }),
        command: Some(IDLE_COMMAND.to_string()),
        volumes,
        ..Default::default()
    };

    let mut services = BTreeMap::from([(DEVCONTAINER_SERVICE.to_string(), devcontainer)]);

    for sidecar in &config.sidecars {
        let kind = SidecarKind::from_image(&sidecar.image)
            .ok_or_else(|| Error::UnsupportedSidecarError { image: sidecar.to_string() })?;
        let service_name = kind.service_name();
        if let Some(previous) = services.insert(service_name.to_string(), kind.service(sidecar)) {
            warn!(
                "Sidecar '{}' replaces '{}' as the '{}' service",
                sidecar,
                previous.image.unwrap_or_default(),
                service_name
            );
        }
    }

    Ok(ComposeFile { services, version: "3".to_string() })
}

/// Renders the composition file as YAML.
pub fn generate(config: &Config) -> Result<String> {
    Ok(serde_yaml::to_string(&build(config)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use serde_json::json;

    fn config(sidecars: serde_json::Value) -> Config {
        parse_config(json!({
            "sidecars": sidecars,
            "mounts": { "src": "/home/me/src", ".devcontainer": "/home/me/src/.devcontainer" },
            "folders": {}
        }))
        .unwrap()
    }

    #[test]
    fn test_volumes_follow_mount_names() {
        let compose = build(&config(json!([]))).unwrap();
        let devcontainer = &compose.services[DEVCONTAINER_SERVICE];

        assert_eq!(devcontainer.volumes, vec![
            "/home/me/src/.devcontainer:/workspace/.devcontainer:cached",
            "/home/me/src:/workspace/src:cached",
        ]);
        assert_eq!(compose.services.len(), 1);
    }

    #[test]
    fn test_redis_sidecar() {
        let content = generate(&config(json!(["redis:7"]))).unwrap();
        assert!(content.contains("redis-server --requirepass password"));
        assert!(content.contains("redis:7"));
    }

    #[test]
    fn test_postgres_sidecar() {
        let compose = build(&config(json!(["postgres:16"]))).unwrap();
        let postgres = &compose.services["postgres"];

        assert_eq!(postgres.image.as_deref(), Some("postgres:16"));
        assert_eq!(postgres.environment["POSTGRES_USER"], "postgres");
        assert_eq!(postgres.environment["POSTGRES_PASSWORD"], "password");
        assert_eq!(postgres.environment["POSTGRES_DATABASE"], "postgres");
    }

    #[test]
    fn test_unknown_sidecar() {
        match generate(&config(json!(["unknown:1"]))) {
            Err(Error::UnsupportedSidecarError { image }) => assert_eq!(image, "unknown:1"),
            other => panic!("Expected UnsupportedSidecarError, got {other:?}"),
        }
    }

    #[test]
    fn test_same_family_keeps_one_service() {
        let compose = build(&config(json!(["redis:7", "redis:6"]))).unwrap();

        assert_eq!(compose.services.len(), 2);
        assert_eq!(compose.services["redis"].image.as_deref(), Some("redis:7"));
    }

    #[test]
    fn test_keys_are_sorted() {
        let content = generate(&config(json!(["redis:7"]))).unwrap();
        let services = content.find("services:").unwrap();
        let version = content.find("version:").unwrap();
        assert!(services < version);
        assert!(content.find("  devcontainer:").unwrap() < content.find("  redis:").unwrap());
    }
}

//! Starter configuration for a directory tree.
//!
//! `init` detects the projects under a root, asks for one version per
//! provisioning plugin found and writes a configuration with a single mount
//! for the root and one folder per project.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde_json::{json, Value};

use crate::config::{parse_config, Plugin};
use crate::discovery::DetectedProject;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::resolve::resolve_mounts;

/// Mount name used when the root has no usable directory name.
pub const FALLBACK_MOUNT_NAME: &str = "workspace";

fn mount_name(root: &Path) -> String {
    root.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && !name.contains(['{', '}']))
        .unwrap_or(FALLBACK_MOUNT_NAME)
        .to_string()
}

/// Path of `directory` relative to `root` with `/` separators, `None` for the root itself.
fn relative_path(root: &Path, directory: &Path) -> Option<String> {
    let relative = directory.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Builds and validates a starter configuration for `projects` found under `root`.
///
/// Projects whose relative path contains a brace cannot be written as a
/// folder path and are skipped.
///
/// # Errors
/// * `Error::NoProjectsError` if no usable project remains
/// * `Error::PromptError` if a version cannot be obtained
/// * `Error::ValidationError` if the result does not validate
/// * `Error::MountReferenceError` if a folder path does not resolve
pub fn build_starter_config(
    root: &Path,
    projects: &[DetectedProject],
    prompter: &dyn Prompter,
) -> Result<Value> {
    let mount = mount_name(root);
    let mut folders = BTreeMap::new();
    let mut usable = Vec::new();

    for project in projects {
        let (name, path) = match relative_path(root, &project.directory) {
            Some(relative) if relative.contains(['{', '}']) => {
                warn!("Skipping project with a brace in its path: {}", project.directory.display());
                continue;
            }
            Some(relative) => (relative.clone(), format!("{{{mount}}}/{relative}")),
            None => (mount.clone(), format!("{{{mount}}}")),
        };
        folders.insert(name, json!({ "path": path, "tools": project.plugins }));
        usable.push(project.clone());
    }

    if usable.is_empty() {
        return Err(Error::NoProjectsError { root: root.display().to_string() });
    }

    let mut tools = Vec::new();
    for plugin in required_plugins(&usable) {
        tools.push(format!("{}:{}", plugin, prompter.tool_version(plugin)?));
    }
    tools.sort();

    let config = json!({
        "tools": tools,
        "mounts": { mount: root.display().to_string() },
        "folders": folders,
    });
    resolve_mounts(&mut parse_config(config.clone())?)?;
    Ok(config)
}

/// Fails with `Error::ConfigExistsError` if `path` exists and `force` is not set.
pub fn ensure_replaceable<P: AsRef<Path>>(path: P, force: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(Error::ConfigExistsError { path: path.display().to_string() });
    }
    Ok(())
}

/// Writes `config` to `path` as pretty JSON.
///
/// # Errors
/// * `Error::ConfigExistsError` if `path` exists and `force` is not set
pub fn write_starter_config<P: AsRef<Path>>(path: P, config: &Value, force: bool) -> Result<()> {
    let path = path.as_ref();
    ensure_replaceable(path, force)?;

    debug!("Writing starter configuration to {}", path.display());
    fs::write(path, format!("{}\n", serde_json::to_string_pretty(config)?))?;
    Ok(())
}

/// Every plugin found across `projects`.
pub fn required_plugins(projects: &[DetectedProject]) -> BTreeSet<Plugin> {
    projects.iter().flat_map(|project| project.plugins.iter().copied()).collect()
}

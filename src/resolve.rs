//! Mount placeholder resolution.
//!
//! Folder paths reference mounts with `{mountName}` tokens. Each token is
//! replaced by the container-side path of the mount (`/workspace/<mountName>`),
//! leftmost first, until none remain.

use crate::config::Config;
use crate::constants::workspace_path;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;

/// Rewrites every folder path of `config` in place. Mounts are left untouched.
///
/// # Errors
/// * `Error::MountReferenceError` naming the first undeclared mount
/// * `Error::NestedPlaceholderError` if a mount's container path contains `{`
pub fn resolve_mounts(config: &mut Config) -> Result<()> {
    let mount_paths: BTreeMap<&str, String> =
        config.mounts.keys().map(|name| (name.as_str(), workspace_path(name, &[]))).collect();
    let token = Regex::new(r"\{([^}]+)\}")?;

    for (folder_name, folder) in config.folders.iter_mut() {
        folder.path = resolve_path(&token, folder_name, &folder.path, &mount_paths)?;
    }
    Ok(())
}

/// Substitutes the leftmost token until none remain.
///
/// Substituted values never contain `{`, so each pass removes one opening
/// brace and the loop ends after at most as many passes as the path has.
fn resolve_path(
    token: &Regex,
    folder: &str,
    path: &str,
    mount_paths: &BTreeMap<&str, String>,
) -> Result<String> {
    let mut resolved = path.to_string();

    for _ in 0..path.matches('{').count() {
        let Some(captures) = token.captures(&resolved) else {
            break;
        };
        let (range, mount) = match (captures.get(0), captures.get(1)) {
            (Some(whole), Some(name)) => (whole.range(), name.as_str()),
            _ => break,
        };
        let mount_path = mount_paths.get(mount).ok_or_else(|| Error::MountReferenceError {
            mount: mount.to_string(),
            folder: folder.to_string(),
        })?;
        if mount_path.contains('{') {
            return Err(Error::NestedPlaceholderError {
                mount: mount.to_string(),
                folder: folder.to_string(),
            });
        }
        resolved.replace_range(range, mount_path);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use serde_json::json;

    fn config(folders: serde_json::Value) -> Config {
        parse_config(json!({
            "mounts": { "src": "/home/me/src", "data": "/mnt/data" },
            "folders": folders
        }))
        .unwrap()
    }

    #[test]
    fn test_single_token() {
        let mut config = config(json!({ "app": { "path": "{src}/app" } }));
        resolve_mounts(&mut config).unwrap();
        assert_eq!(config.folders["app"].path, "/workspace/src/app");
    }

    #[test]
    fn test_multiple_tokens() {
        let mut config = config(json!({ "odd": { "path": "{src}/x/{data}/{src}" } }));
        resolve_mounts(&mut config).unwrap();
        assert_eq!(config.folders["odd"].path, "/workspace/src/x//workspace/data//workspace/src");
        assert!(!config.folders["odd"].path.contains('{'));
    }

    #[test]
    fn test_mounts_are_not_modified() {
        let mut config = config(json!({ "app": { "path": "{src}" } }));
        let mounts = config.mounts.clone();
        resolve_mounts(&mut config).unwrap();
        assert_eq!(config.mounts, mounts);
    }

    #[test]
    fn test_undeclared_mount() {
        let mut config = config(json!({ "app": { "path": "{src}/{missing}" } }));
        match resolve_mounts(&mut config) {
            Err(Error::MountReferenceError { mount, folder }) => {
                assert_eq!(mount, "missing");
                assert_eq!(folder, "app");
            }
            other => panic!("Expected MountReferenceError, got {other:?}"),
        }
    }

    #[test]
    fn test_many_tokens_resolve() {
        let path = vec!["{src}"; 100].join("/");
        let mut config = config(json!({ "deep": { "path": path } }));
        resolve_mounts(&mut config).unwrap();

        let resolved = &config.folders["deep"].path;
        assert!(!resolved.contains('{'));
        assert_eq!(resolved.matches("/workspace/src").count(), 100);
    }

    #[test]
    fn test_nested_placeholder() {
        let mut config = parse_config(json!({
            "mounts": { "{a": "/host" },
            "folders": { "loop": { "path": "{{a}" } }
        }))
        .unwrap();

        match resolve_mounts(&mut config) {
            Err(Error::NestedPlaceholderError { mount, folder }) => {
                assert_eq!(mount, "{a");
                assert_eq!(folder, "loop");
            }
            other => panic!("Expected NestedPlaceholderError, got {other:?}"),
        }
    }
}

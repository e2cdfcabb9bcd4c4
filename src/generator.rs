//! Generation orchestration.
//!
//! Runs the whole pipeline for one configuration file:
//!
//! 1. Load and validate the configuration
//! 2. Inject the reserved metadata mount and folder, resolve mount references
//! 3. Render every generated file in memory
//! 4. Create the output directory
//! 5. Write the generated files, replacing previous versions
//! 6. Write hook templates that do not exist yet
//! 7. Mark written shell scripts executable
//!
//! Any failure aborts the remaining steps. Already written files are left in
//! place; running the pipeline again is always safe.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::artifacts;
use crate::config::load_config;
use crate::constants::{DEVCONTAINER_MOUNT_NAME, SHELL_SCRIPT_EXTENSION};
use crate::error::Result;
use crate::hooks::write_hook_templates;
use crate::logger::{Event, Reporter};
use crate::renderer::TemplateRenderer;
use crate::resolve::resolve_mounts;

/// Mode applied to generated shell scripts.
pub const SCRIPT_MODE: u32 = 0o755;

/// Returns the directory generated files go to for a workspace root.
///
/// A root that already is a `.devcontainer` directory is used as is.
pub fn devcontainer_dir<P: AsRef<Path>>(workspace_root: P) -> PathBuf {
    let workspace_root = workspace_root.as_ref();
    if workspace_root.file_name().is_some_and(|name| name == DEVCONTAINER_MOUNT_NAME) {
        workspace_root.to_path_buf()
    } else {
        workspace_root.join(DEVCONTAINER_MOUNT_NAME)
    }
}

/// Returns `path` anchored at the current directory when it is relative.
///
/// The path may not exist yet. `.` components are dropped.
pub fn absolute_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute =
        if path.is_absolute() { path.to_path_buf() } else { std::env::current_dir()?.join(path) };
    Ok(absolute.components().filter(|c| !matches!(c, Component::CurDir)).collect())
}

/// Outcome of a generation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generated files, in write order.
    pub written: Vec<PathBuf>,
    /// Hook templates created by this run.
    pub created_hooks: Vec<PathBuf>,
}

/// Sequences validation, resolution and file generation.
pub struct Generator<'a> {
    renderer: &'a dyn TemplateRenderer,
    reporter: &'a dyn Reporter,
}

impl<'a> Generator<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, reporter: &'a dyn Reporter) -> Self {
        Self { renderer, reporter }
    }

    /// Generates the devcontainer described by `config_path` into `output_dir`.
    ///
    /// # Errors
    /// * `Error::ValidationError` / `Error::ConfigParseError` before anything is written
    /// * `Error::MountReferenceError` for an undeclared mount
    /// * `Error::UnsupportedSidecarError` for an unknown sidecar family
    /// * `Error::IoError` if a directory, file or permission change fails
    pub fn generate<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        config_path: P,
        output_dir: Q,
    ) -> Result<GenerationReport> {
        let config_path = config_path.as_ref();
        let output_dir = output_dir.as_ref();

        self.reporter.report(Event::ConfigLoaded { path: config_path.to_path_buf() });
        let mut config = load_config(config_path)?;

        if config.inject_metadata(output_dir) {
            self.reporter
                .report(Event::ReservedEntryReplaced { name: DEVCONTAINER_MOUNT_NAME.to_string() });
        }
        resolve_mounts(&mut config)?;
        self.reporter.report(Event::ConfigResolved { config: serde_json::to_string_pretty(&config)? });

        let rendered = artifacts::render_all(&config, self.renderer)?;

        if !output_dir.exists() {
            self.reporter.report(Event::DirectoryCreated { path: output_dir.to_path_buf() });
            fs::create_dir_all(output_dir)?;
        }

        let mut report = GenerationReport::default();
        for artifact in rendered {
            let path = output_dir.join(artifact.file_name);
            self.reporter.report(Event::FileWritten { path: path.clone() });
            fs::write(&path, artifact.content)?;
            report.written.push(path);
        }

        report.created_hooks = write_hook_templates(self.renderer, self.reporter, output_dir)?;

        for path in report.written.iter().chain(&report.created_hooks) {
            if is_shell_script(path) {
                self.set_executable(path)?;
            }
        }

        Ok(report)
    }

    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE))?;
        self.reporter.report(Event::PermissionsSet { path: path.to_path_buf(), mode: SCRIPT_MODE });
        Ok(())
    }

    #[cfg(not(unix))]
    fn set_executable(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn is_shell_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SHELL_SCRIPT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devcontainer_dir() {
        assert_eq!(devcontainer_dir("/project"), PathBuf::from("/project/.devcontainer"));
        assert_eq!(
            devcontainer_dir("/project/.devcontainer"),
            PathBuf::from("/project/.devcontainer")
        );
    }

    #[test]
    fn test_absolute_path() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path("out").unwrap(), cwd.join("out"));
        assert_eq!(absolute_path("./.devcontainer").unwrap(), cwd.join(".devcontainer"));
        assert_eq!(absolute_path(".").unwrap(), cwd);
        assert_eq!(absolute_path("/project/out").unwrap(), PathBuf::from("/project/out"));
    }

    #[test]
    fn test_is_shell_script() {
        assert!(is_shell_script(Path::new("/p/post-create.sh")));
        assert!(!is_shell_script(Path::new("/p/Dockerfile")));
        assert!(!is_shell_script(Path::new("/p/devcontainer.json")));
    }
}

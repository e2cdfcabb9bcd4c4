//! Project discovery.
//! Walks a directory tree looking for language projects by their manifest
//! files. A directory holding a manifest is a project and its subtree is not
//! searched further.

use crate::config::Plugin;
use crate::error::Result;
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never searched.
pub const EXCLUDED_DIRS: [&str; 2] = ["node_modules", ".git"];

impl Plugin {
    /// Files whose presence marks a project of this plugin.
    pub fn manifests(&self) -> &'static [&'static str] {
        match self {
            Plugin::Nodejs => &["package.json"],
            Plugin::Perl => &["Makefile.PL"],
            Plugin::Python => &["pyproject.toml", "setup.py", "requirements.txt"],
        }
    }

    fn detect(&self, dir: &Path) -> bool {
        self.manifests().iter().any(|manifest| dir.join(manifest).is_file())
    }
}

/// A directory recognized as a project of one or more plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedProject {
    pub directory: PathBuf,
    pub plugins: BTreeSet<Plugin>,
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Finds the projects under `root`, in file name order.
///
/// # Errors
/// * `Error::IoError` if a directory cannot be read
pub fn detect_projects<P: AsRef<Path>>(root: P) -> Result<Vec<DetectedProject>> {
    let mut projects = Vec::new();
    let mut walker = WalkDir::new(root.as_ref())
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry));

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let plugins: BTreeSet<Plugin> =
            Plugin::ALL.into_iter().filter(|plugin| plugin.detect(entry.path())).collect();
        if plugins.is_empty() {
            continue;
        }

        debug!("Found {:?} project: {}", plugins, entry.path().display());
        projects.push(DetectedProject { directory: entry.path().to_path_buf(), plugins });
        walker.skip_current_dir();
    }

    Ok(projects)
}

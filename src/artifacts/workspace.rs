//! Multi-root workspace descriptor generation.

use crate::config::Config;
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct CodeWorkspace {
    pub folders: Vec<WorkspaceFolder>,
}

/// One root per folder, ordered by folder name.
pub fn build(config: &Config) -> CodeWorkspace {
    let folders = config
        .folders
        .iter()
        .map(|(name, folder)| WorkspaceFolder { name: name.clone(), path: folder.path.clone() })
        .collect();
    CodeWorkspace { folders }
}

pub fn generate(config: &Config) -> Result<String> {
    let mut content = serde_json::to_string_pretty(&build(config))?;
    content.push('\n');
    Ok(content)
}

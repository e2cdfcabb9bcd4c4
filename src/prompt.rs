//! User input for `init`.

use crate::config::Plugin;
use crate::error::{Error, Result};
use dialoguer::Input;
use std::collections::BTreeMap;

/// Supplies the tool versions of a starter configuration.
pub trait Prompter {
    fn tool_version(&self, plugin: Plugin) -> Result<String>;
}

/// Uses preset versions where given and asks on the terminal otherwise.
#[derive(Debug, Default)]
pub struct DialoguerPrompter {
    presets: BTreeMap<Plugin, String>,
}

impl DialoguerPrompter {
    pub fn new(presets: BTreeMap<Plugin, String>) -> Self {
        Self { presets }
    }
}

/// A version must be non-empty and must not contain the `plugin:version` separator.
pub fn validate_version(version: &str) -> std::result::Result<(), String> {
    if version.trim().is_empty() {
        return Err("version must not be empty".to_string());
    }
    if version.contains(':') {
        return Err("version must not contain ':'".to_string());
    }
    Ok(())
}

impl Prompter for DialoguerPrompter {
    fn tool_version(&self, plugin: Plugin) -> Result<String> {
        if let Some(version) = self.presets.get(&plugin) {
            return Ok(version.clone());
        }

        let version: String = Input::new()
            .with_prompt(format!("Enter '{plugin}' version"))
            .validate_with(|input: &String| validate_version(input))
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(version.trim().to_string())
    }
}

/// Parses a `PLUGIN=VERSION` command line value.
pub fn parse_tool_version(raw: &str) -> std::result::Result<(Plugin, String), String> {
    let (plugin, version) =
        raw.split_once('=').ok_or_else(|| format!("expected PLUGIN=VERSION, got '{raw}'"))?;
    let plugin: Plugin = plugin.parse()?;
    validate_version(version)?;
    Ok((plugin, version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_skip_the_prompt() {
        let prompter =
            DialoguerPrompter::new(BTreeMap::from([(Plugin::Python, "3.11".to_string())]));
        assert_eq!(prompter.tool_version(Plugin::Python).unwrap(), "3.11");
    }

    #[test]
    fn test_parse_tool_version() {
        assert_eq!(parse_tool_version("nodejs=20").unwrap(), (Plugin::Nodejs, "20".to_string()));
        assert!(parse_tool_version("nodejs").is_err());
        assert!(parse_tool_version("ruby=3").is_err());
        assert!(parse_tool_version("python=").is_err());
        assert!(parse_tool_version("python=3:11").is_err());
    }
}

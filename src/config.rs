//! Configuration handling for devcontainer-utils.
//! Loads the JSON configuration file, validates it against the schema and
//! produces a typed, defaulted [`Config`].

use crate::constants::DEVCONTAINER_MOUNT_NAME;
use crate::error::{Error, Result};
use crate::schema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Language ecosystems with provisioning and editor support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    Nodejs,
    Perl,
    Python,
}

impl Plugin {
    /// Every plugin, in the fixed order generators iterate them.
    pub const ALL: [Plugin; 3] = [Plugin::Nodejs, Plugin::Perl, Plugin::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plugin::Nodejs => "nodejs",
            Plugin::Perl => "perl",
            Plugin::Python => "python",
        }
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plugin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Plugin::ALL
            .into_iter()
            .find(|plugin| plugin.as_str() == s)
            .ok_or_else(|| format!("unknown plugin '{s}'"))
    }
}

/// Splits `name:tag` into exactly two non-empty parts.
fn split_name_tag(raw: &str) -> Option<(&str, &str)> {
    let (name, tag) = raw.split_once(':')?;
    if name.is_empty() || tag.is_empty() || tag.contains(':') {
        return None;
    }
    Some((name, tag))
}

/// A `plugin:version` entry of `tools`.
///
/// Ordered by the full `plugin:version` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tool {
    pub plugin: String,
    pub version: String,
}

impl Tool {
    /// The provisioning plugin this tool enables, if it is one.
    pub fn known_plugin(&self) -> Option<Plugin> {
        self.plugin.parse().ok()
    }
}

impl TryFrom<String> for Tool {
    type Error = String;

    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        let (plugin, version) =
            split_name_tag(&raw).ok_or_else(|| format!("malformed tool '{raw}'"))?;
        Ok(Self { plugin: plugin.to_string(), version: version.to_string() })
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.to_string()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.plugin, self.version)
    }
}

impl Ord for Tool {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl PartialOrd for Tool {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An `image:tag` entry of `sidecars`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sidecar {
    pub image: String,
    pub tag: String,
}

impl TryFrom<String> for Sidecar {
    type Error = String;

    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        let (image, tag) =
            split_name_tag(&raw).ok_or_else(|| format!("malformed sidecar '{raw}'"))?;
        Ok(Self { image: image.to_string(), tag: tag.to_string() })
    }
}

impl From<Sidecar> for String {
    fn from(sidecar: Sidecar) -> Self {
        sidecar.to_string()
    }
}

impl fmt::Display for Sidecar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.image, self.tag)
    }
}

/// A workspace folder: a path built from mount placeholders plus the plugins
/// whose dependencies are installed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub path: String,
    #[serde(default)]
    pub tools: BTreeSet<Plugin>,
}

impl Folder {
    pub fn uses(&self, plugin: Plugin) -> bool {
        self.tools.contains(&plugin)
    }
}

/// Package registry overrides. Absent fields keep the tool defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pypi_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_pypi_servers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_pypi_servers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm_registry: Option<String>,
    #[serde(default)]
    pub use_yarn: bool,
}

/// The validated, defaulted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: BTreeSet<Tool>,
    #[serde(default)]
    pub sidecars: BTreeSet<Sidecar>,
    pub mounts: BTreeMap<String, String>,
    pub folders: BTreeMap<String, Folder>,
    #[serde(default)]
    pub options: Options,
}

impl Config {
    /// Whether any tool enables `plugin`.
    pub fn has_plugin(&self, plugin: Plugin) -> bool {
        self.tools.iter().any(|tool| tool.known_plugin() == Some(plugin))
    }

    /// The provisioning plugins enabled by `tools`, in fixed order.
    pub fn plugins(&self) -> BTreeSet<Plugin> {
        self.tools.iter().filter_map(Tool::known_plugin).collect()
    }

    /// Adds the reserved metadata mount and folder.
    ///
    /// The engine entry replaces any user entry of the same name. Returns `true`
    /// when a user-declared entry was replaced.
    pub fn inject_metadata<P: AsRef<Path>>(&mut self, devcontainer_dir: P) -> bool {
        let host_path = devcontainer_dir.as_ref().display().to_string();
        let replaced_mount =
            self.mounts.insert(DEVCONTAINER_MOUNT_NAME.to_string(), host_path).is_some();
        let replaced_folder = self
            .folders
            .insert(
                DEVCONTAINER_MOUNT_NAME.to_string(),
                Folder { path: format!("{{{DEVCONTAINER_MOUNT_NAME}}}"), tools: BTreeSet::new() },
            )
            .is_some();
        replaced_mount || replaced_folder
    }
}

/// Validates raw JSON and converts it into a [`Config`].
///
/// # Errors
/// * `Error::ValidationError` listing every schema violation
pub fn parse_config(raw: serde_json::Value) -> Result<Config> {
    schema::validate(&raw)?;
    serde_json::from_value(raw)
        .map_err(|e| Error::ValidationError { violations: vec![e.to_string()] })
}

/// Reads and validates the configuration file at `path`.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::ConfigParseError` if it is not JSON
/// * `Error::ValidationError` if it violates the schema
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&content).map_err(|source| {
        Error::ConfigParseError { path: path.display().to_string(), source }
    })?;
    parse_config(raw)
}

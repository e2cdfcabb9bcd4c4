//! IDE container descriptor generation.
//!
//! The descriptor points the editor at the composition file and carries the
//! editor extensions and settings. A base set always applies; every provisioning
//! plugin present in `tools` contributes its own block through
//! [`PLUGIN_CUSTOMIZATIONS`].

use crate::config::{Config, Plugin};
use crate::constants::{
    files, workspace_path, DEVCONTAINER_MOUNT_NAME, DEVCONTAINER_SERVICE, ROOT_WORKSPACE_FOLDER,
    TOOL_SHIMS_DIR,
};
use crate::error::Result;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

const BASE_EXTENSIONS: [&str; 4] = [
    "benfiola.devcontainer-utils",
    "esbenp.prettier-vscode",
    "rohit-gohri.format-code-action",
    "usernamehw.errorlens",
];

/// Editor customizations accumulated across plugins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VscodeCustomizations {
    pub extensions: BTreeSet<String>,
    pub settings: Map<String, Value>,
}

impl VscodeCustomizations {
    fn base() -> Self {
        let mut customizations = Self::default();
        customizations.add_extensions(&BASE_EXTENSIONS);
        customizations.set(
            "editor.codeActionsOnSave",
            json!(["source.organizeImports", "source.formatDocument"]),
        );
        customizations.set("editor.defaultFormatter", json!("esbenp.prettier-vscode"));
        customizations
    }

    fn add_extensions(&mut self, extensions: &[&str]) {
        self.extensions.extend(extensions.iter().map(|e| e.to_string()));
    }

    fn set(&mut self, key: &str, value: Value) {
        self.settings.insert(key.to_string(), value);
    }
}

/// Contribution of one plugin to the editor customizations.
pub type Customize = fn(&Config, VscodeCustomizations) -> VscodeCustomizations;

/// Plugin contributions, applied in this order for the plugins present in `tools`.
pub const PLUGIN_CUSTOMIZATIONS: [(Plugin, Customize); 2] = [
    (Plugin::Perl, perl_customizations as Customize),
    (Plugin::Python, python_customizations as Customize),
];

fn perl_customizations(config: &Config, mut customizations: VscodeCustomizations) -> VscodeCustomizations {
    let perl = format!("{TOOL_SHIMS_DIR}/perl");
    let inc: BTreeSet<&str> = config
        .folders
        .values()
        .filter(|folder| folder.uses(Plugin::Perl))
        .map(|folder| folder.path.as_str())
        .collect();

    customizations.add_extensions(&["fractalboy.pls", "richterger.perl"]);
    customizations.set("perl.perlCmd", json!(perl));
    customizations.set("perl.perlInc", json!(inc));
    customizations.set("pls.syntax.perl", json!(perl));
    customizations.set("pls.inc", json!(inc));
    customizations
}

fn python_customizations(_: &Config, mut customizations: VscodeCustomizations) -> VscodeCustomizations {
    customizations.add_extensions(&[
        "ms-python.black-formatter",
        "ms-python.isort",
        "ms-python.python",
        "ms-python.vscode-pylance",
        "njpwerner.autodocstring",
    ]);
    customizations.set("[python]", json!({ "editor.defaultFormatter": "ms-python.black-formatter" }));
    customizations.set("isort.args", json!(["--profile", "black"]));
    customizations.set("python.defaultInterpreterPath", json!(format!("{TOOL_SHIMS_DIR}/python")));
    customizations
}

#[derive(Debug, Serialize)]
pub struct Customizations {
    pub vscode: VscodeCustomizations,
}

/// The descriptor document. Fields are declared in key order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Devcontainer {
    pub customizations: Customizations,
    pub docker_compose_file: String,
    pub name: String,
    pub post_create_command: String,
    pub service: String,
    pub workspace_folder: String,
}

/// Builds the descriptor for the plugins enabled in `config`.
pub fn build(config: &Config) -> Devcontainer {
    let plugins = config.plugins();
    let vscode = PLUGIN_CUSTOMIZATIONS
        .iter()
        .filter(|(plugin, _)| plugins.contains(plugin))
        .fold(VscodeCustomizations::base(), |acc, (_, customize)| customize(config, acc));

    Devcontainer {
        customizations: Customizations { vscode },
        docker_compose_file: files::DOCKER_COMPOSE.to_string(),
        name: DEVCONTAINER_SERVICE.to_string(),
        post_create_command: workspace_path(DEVCONTAINER_MOUNT_NAME, &[files::POST_CREATE]),
        service: DEVCONTAINER_SERVICE.to_string(),
        workspace_folder: ROOT_WORKSPACE_FOLDER.to_string(),
    }
}

/// Renders the descriptor as pretty-printed JSON.
pub fn generate(config: &Config) -> Result<String> {
    let mut content = serde_json::to_string_pretty(&build(config))?;
    content.push('\n');
    Ok(content)
}

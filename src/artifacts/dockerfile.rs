//! Build file generation.

use crate::config::Config;
use crate::constants::{commands, BASE_IMAGE};
use crate::error::Result;
use crate::renderer::{TemplateRenderer, DOCKERFILE_TEMPLATE};
use serde_json::json;

/// Renders the build file: the base image followed by one install directive
/// per tool, ordered by the full `plugin:version` string.
pub fn generate(config: &Config, renderer: &dyn TemplateRenderer) -> Result<String> {
    let tools: Vec<serde_json::Value> = config
        .tools
        .iter()
        .map(|tool| {
            json!({
                "name": tool.to_string(),
                "plugin": tool.plugin,
                "version": tool.version,
            })
        })
        .collect();

    let context = json!({
        "base_image": BASE_IMAGE,
        "install_command": commands::INSTALL_TOOL,
        "tools": tools,
    });
    renderer.render(DOCKERFILE_TEMPLATE, &context)
}

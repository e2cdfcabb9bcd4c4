//! Generators for the files of a devcontainer.
//!
//! Each generator is a pure function of the resolved [`Config`]: identical input
//! always yields byte-identical output, so regenerated files can be committed
//! without spurious churn.

use crate::config::Config;
use crate::constants::files;
use crate::error::Result;
use crate::renderer::TemplateRenderer;

pub mod compose;
pub mod devcontainer;
pub mod dockerfile;
pub mod post_create;
pub mod workspace;

/// The content of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub content: String,
}

/// Renders every generated file in write order.
///
/// Nothing touches the filesystem here; a failing generator leaves no partial output.
pub fn render_all(config: &Config, renderer: &dyn TemplateRenderer) -> Result<Vec<Artifact>> {
    Ok(vec![
        Artifact { file_name: files::DOCKERFILE, content: dockerfile::generate(config, renderer)? },
        Artifact { file_name: files::DOCKER_COMPOSE, content: compose::generate(config)? },
        Artifact { file_name: files::DEVCONTAINER, content: devcontainer::generate(config)? },
        Artifact { file_name: files::POST_CREATE, content: post_create::generate(config) },
        Artifact { file_name: files::WORKSPACE, content: workspace::generate(config)? },
    ])
}

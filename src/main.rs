//! devcontainer-utils entry point.
//! Parses the command line and dispatches to generation, init or the
//! readiness wait.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use devcontainer_utils::{
    cli::{get_args, Args, Command},
    config::Plugin,
    constants::CONFIG_FILE,
    discovery::detect_projects,
    generator::{absolute_path, devcontainer_dir, Generator},
    init::{build_starter_config, ensure_replaceable, write_starter_config},
    logger::{init_logger, LogReporter},
    prompt::DialoguerPrompter,
    ready::{wait_until_ready, CancellationToken, CommandProbe, WaitOptions},
    renderer::MiniJinjaRenderer,
};
use log::info;

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        log::error!("{err:?}");
        eprintln!("An error occurred. See the log output above for details.");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Generate { config, workspace_root, output_dir } => {
            generate(&config, workspace_root, output_dir)
        }
        Command::Init { root, tool_versions, force } => {
            init(&root, tool_versions.into_iter().collect(), force)
        }
        Command::Wait { interval_ms, timeout_secs, max_attempts } => {
            let options = WaitOptions {
                interval: Duration::from_millis(interval_ms),
                timeout: timeout_secs.map(Duration::from_secs),
                max_attempts,
            };
            let attempts =
                wait_until_ready(&CommandProbe::default(), &options, &CancellationToken::new())
                    .context("Waiting for the environment failed")?;
            info!("Environment ready after {attempts} attempt(s).");
            Ok(())
        }
    }
}

/// Resolves the workspace root and output directory, then runs the generator.
fn generate(
    config: &Path,
    workspace_root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let config = config
        .canonicalize()
        .with_context(|| format!("Configuration file '{}' not found", config.display()))?;
    let workspace_root = match workspace_root {
        Some(root) => root
            .canonicalize()
            .with_context(|| format!("Workspace root '{}' not found", root.display()))?,
        None => config
            .parent()
            .map(Path::to_path_buf)
            .context("Configuration file has no parent directory")?,
    };
    // Host side of the metadata volume; must be absolute.
    let output_dir = match output_dir {
        Some(dir) => absolute_path(&dir)
            .with_context(|| format!("Cannot resolve output directory '{}'", dir.display()))?,
        None => devcontainer_dir(&workspace_root),
    };

    let renderer = MiniJinjaRenderer::new()?;
    let reporter = LogReporter;
    let report = Generator::new(&renderer, &reporter)
        .generate(&config, &output_dir)
        .with_context(|| format!("Generation from '{}' failed", config.display()))?;

    info!(
        "Generated {} file(s) and {} new hook template(s) in {}.",
        report.written.len(),
        report.created_hooks.len(),
        output_dir.display()
    );
    Ok(())
}

fn init(root: &Path, presets: BTreeMap<Plugin, String>, force: bool) -> Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Directory '{}' not found", root.display()))?;
    let config_path = root.join(CONFIG_FILE);
    ensure_replaceable(&config_path, force)?;

    let projects = detect_projects(&root)?;
    let config = build_starter_config(&root, &projects, &DialoguerPrompter::new(presets))?;
    write_starter_config(&config_path, &config, force)?;

    info!("Wrote {} for {} project(s).", config_path.display(), projects.len());
    Ok(())
}

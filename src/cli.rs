//! Command-line interface for devcontainer-utils.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Plugin;
use crate::constants::CONFIG_FILE;
use crate::prompt::parse_tool_version;

/// Command-line arguments structure for devcontainer-utils.
#[derive(Parser, Debug)]
#[command(author, version, about = "devcontainer-utils: development containers from a small declarative config", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generate the .devcontainer directory from a configuration file
    Generate {
        /// Path to the configuration file
        #[arg(value_name = "CONFIG", default_value = CONFIG_FILE)]
        config: PathBuf,

        /// Workspace root; defaults to the directory holding the configuration file
        #[arg(long, value_name = "DIR")]
        workspace_root: Option<PathBuf>,

        /// Directory generated files are written to; defaults to <ROOT>/.devcontainer
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Detect projects under a directory and write a starter configuration
    Init {
        /// Directory to scan
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,

        /// Version for a plugin instead of asking for it, may be repeated
        #[arg(long = "tool-version", value_name = "PLUGIN=VERSION", value_parser = parse_tool_version)]
        tool_versions: Vec<(Plugin, String)>,

        /// Replace an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Block until the environment has finished provisioning
    Wait {
        /// Delay between two probe attempts in milliseconds
        #[arg(long, value_name = "N", default_value_t = 500)]
        interval_ms: u64,

        /// Give up after this many seconds
        #[arg(long, value_name = "N")]
        timeout_secs: Option<u64>,

        /// Give up after this many probe attempts
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: Option<u32>,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

//! Logging setup and the event sink handed to the generation orchestrator.

use std::fmt;
use std::path::PathBuf;

pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
}

/// Progress of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ConfigLoaded { path: PathBuf },
    ReservedEntryReplaced { name: String },
    ConfigResolved { config: String },
    DirectoryCreated { path: PathBuf },
    FileWritten { path: PathBuf },
    TemplateCreated { path: PathBuf },
    TemplateSkipped { path: PathBuf },
    PermissionsSet { path: PathBuf, mode: u32 },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ConfigLoaded { path } => write!(f, "config file: {}", path.display()),
            Event::ReservedEntryReplaced { name } => {
                write!(f, "replacing user-declared reserved mount/folder '{name}'")
            }
            Event::ConfigResolved { config } => write!(f, "config: {config}"),
            Event::DirectoryCreated { path } => {
                write!(f, "creating devcontainer path: {}", path.display())
            }
            Event::FileWritten { path } => write!(f, "creating file: {}", path.display()),
            Event::TemplateCreated { path } => write!(f, "creating template: {}", path.display()),
            Event::TemplateSkipped { path } => {
                write!(f, "not creating template: {} - file exists", path.display())
            }
            Event::PermissionsSet { path, mode } => {
                write!(f, "setting mode {mode:o} on {}", path.display())
            }
        }
    }
}

/// Receives the events of a generation run.
pub trait Reporter {
    fn report(&self, event: Event);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: Event) {
        match event {
            Event::ConfigResolved { .. } | Event::PermissionsSet { .. } => log::debug!("{event}"),
            Event::ReservedEntryReplaced { .. } => log::warn!("{event}"),
            _ => log::info!("{event}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = Event::TemplateSkipped { path: PathBuf::from("/p/user-after-post-create.sh") };
        assert_eq!(event.to_string(), "not creating template: /p/user-after-post-create.sh - file exists");

        let event = Event::PermissionsSet { path: PathBuf::from("/p/post-create.sh"), mode: 0o755 };
        assert_eq!(event.to_string(), "setting mode 755 on /p/post-create.sh");
    }
}

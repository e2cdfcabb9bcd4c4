//! User hook scripts.
//!
//! The provisioning script calls a hook before and after its own steps. Hook
//! files belong to the user: they are created with boilerplate when missing
//! and never read or rewritten afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::constants::{files, DISPLAY_NAME};
use crate::error::Result;
use crate::logger::{Event, Reporter};
use crate::renderer::{TemplateRenderer, USER_HOOK_TEMPLATE};

/// A write-once hook file and the provisioning stage it runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    pub file_name: &'static str,
    pub stage: &'static str,
}

pub const HOOKS: [Hook; 2] = [
    Hook { file_name: files::USER_BEFORE_POST_CREATE, stage: "before" },
    Hook { file_name: files::USER_AFTER_POST_CREATE, stage: "after" },
];

/// Renders the boilerplate of a hook file.
pub fn hook_boilerplate(renderer: &dyn TemplateRenderer, hook: &Hook) -> Result<String> {
    renderer.render(USER_HOOK_TEMPLATE, &json!({ "stage": hook.stage, "display_name": DISPLAY_NAME }))
}

/// Writes every hook that does not exist yet and returns the created paths.
///
/// Existence is checked without following symlinks, so a dangling link still
/// counts as a user file.
pub fn write_hook_templates<P: AsRef<Path>>(
    renderer: &dyn TemplateRenderer,
    reporter: &dyn Reporter,
    output_dir: P,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    let mut created = Vec::new();

    for hook in &HOOKS {
        let path = output_dir.join(hook.file_name);
        if fs::symlink_metadata(&path).is_ok() {
            reporter.report(Event::TemplateSkipped { path });
            continue;
        }

        reporter.report(Event::TemplateCreated { path: path.clone() });
        fs::write(&path, hook_boilerplate(renderer, hook)?)?;
        created.push(path);
    }

    Ok(created)
}

use std::fs;
use std::path::{Path, PathBuf};

use devcontainer_utils::constants::files;
use devcontainer_utils::hooks::{hook_boilerplate, write_hook_templates, HOOKS};
use devcontainer_utils::logger::LogReporter;
use devcontainer_utils::renderer::MiniJinjaRenderer;
use tempfile::TempDir;

fn hook_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(files::USER_BEFORE_POST_CREATE), dir.join(files::USER_AFTER_POST_CREATE))
}

#[test]
fn test_hook_order() {
    assert_eq!(HOOKS[0].file_name, files::USER_BEFORE_POST_CREATE);
    assert_eq!(HOOKS[0].stage, "before");
    assert_eq!(HOOKS[1].file_name, files::USER_AFTER_POST_CREATE);
    assert_eq!(HOOKS[1].stage, "after");
}

#[test]
fn test_boilerplate_names_the_stage() {
    let renderer = MiniJinjaRenderer::new().unwrap();

    let before = hook_boilerplate(&renderer, &HOOKS[0]).unwrap();
    assert!(before.starts_with("#!/bin/bash -e\n"));
    assert!(before.contains("run before post-creation"));
    assert!(before.contains("devcontainer-utils won't touch this file!"));

    let after = hook_boilerplate(&renderer, &HOOKS[1]).unwrap();
    assert!(after.contains("run after post-creation"));
}

#[test]
fn test_hooks_are_written_once() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new().unwrap();
    let (before, after) = hook_paths(temp_dir.path());

    let created = write_hook_templates(&renderer, &LogReporter, temp_dir.path()).unwrap();
    assert_eq!(created, vec![before.clone(), after.clone()]);

    fs::write(&before, "echo custom\n").unwrap();
    fs::remove_file(&after).unwrap();

    let created = write_hook_templates(&renderer, &LogReporter, temp_dir.path()).unwrap();
    assert_eq!(created, vec![after]);
    assert_eq!(fs::read_to_string(&before).unwrap(), "echo custom\n");
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_counts_as_existing() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new().unwrap();
    let (before, _) = hook_paths(temp_dir.path());
    std::os::unix::fs::symlink(temp_dir.path().join("nowhere.sh"), &before).unwrap();

    let created = write_hook_templates(&renderer, &LogReporter, temp_dir.path()).unwrap();
    assert_eq!(created.len(), 1);
    assert!(fs::symlink_metadata(&before).unwrap().file_type().is_symlink());
}

use std::fs;
use std::path::Path;
use std::process::Command;

use devcontainer_utils::constants::files;
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) {
    let output = Command::new(env!("CARGO_BIN_EXE_devcontainer-utils"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("devcontainer-utils.json"),
        r#"{ "mounts": { "src": "/home/me/src" }, "folders": { "app": { "path": "{src}/app" } } }"#,
    )
    .unwrap();
    temp_dir
}

/// Host side of the volume mounted at `/workspace/.devcontainer`.
fn metadata_volume_source(compose_file: &Path) -> String {
    let content = fs::read_to_string(compose_file).unwrap();
    let line = content
        .lines()
        .find(|line| line.contains(":/workspace/.devcontainer:cached"))
        .unwrap();
    let volume = line.trim().trim_start_matches("- ").trim_matches(|c| c == '\'' || c == '"');
    volume.trim_end_matches(":/workspace/.devcontainer:cached").to_string()
}

#[test]
fn test_relative_output_dir_is_mounted_by_absolute_path() {
    let temp_dir = setup();
    run(temp_dir.path(), &["generate", "--output-dir", "out"]);

    let output_dir = temp_dir.path().join("out");
    let source = metadata_volume_source(&output_dir.join(files::DOCKER_COMPOSE));
    assert!(source.starts_with('/'), "{source}");
    assert!(source.ends_with("/out"), "{source}");
    assert!(Path::new(&source).join(files::POST_CREATE).is_file());
}

#[test]
fn test_relative_workspace_root_is_mounted_by_absolute_path() {
    let temp_dir = setup();
    run(temp_dir.path(), &["generate", "--workspace-root", "."]);

    let output_dir = temp_dir.path().join(".devcontainer");
    let source = metadata_volume_source(&output_dir.join(files::DOCKER_COMPOSE));
    assert!(source.starts_with('/'), "{source}");
    assert!(source.ends_with("/.devcontainer"), "{source}");
    assert!(Path::new(&source).join(files::POST_CREATE).is_file());
}

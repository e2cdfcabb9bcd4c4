use clap::Parser;
use devcontainer_utils::cli::{Args, Command};
use devcontainer_utils::config::Plugin;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("devcontainer-utils")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_generate_defaults() {
    let parsed = Args::try_parse_from(make_args(&["generate"])).unwrap();

    assert!(!parsed.verbose);
    assert_eq!(parsed.command, Command::Generate {
        config: PathBuf::from("devcontainer-utils.json"),
        workspace_root: None,
        output_dir: None,
    });
}

#[test]
fn test_generate_all_flags() {
    let parsed = Args::try_parse_from(make_args(&[
        "generate",
        "--verbose",
        "--workspace-root",
        "/project",
        "--output-dir",
        "/out",
        "/project/config.json",
    ]))
    .unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.command, Command::Generate {
        config: PathBuf::from("/project/config.json"),
        workspace_root: Some(PathBuf::from("/project")),
        output_dir: Some(PathBuf::from("/out")),
    });
}

#[test]
fn test_init_tool_versions() {
    let parsed = Args::try_parse_from(make_args(&[
        "-v",
        "init",
        "--tool-version",
        "python=3.11",
        "--tool-version",
        "nodejs=20",
        "--force",
    ]))
    .unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.command, Command::Init {
        root: PathBuf::from("."),
        tool_versions: vec![
            (Plugin::Python, "3.11".to_string()),
            (Plugin::Nodejs, "20".to_string())
        ],
        force: true,
    });
}

#[test]
fn test_init_rejects_unknown_plugin() {
    assert!(Args::try_parse_from(make_args(&["init", "--tool-version", "ruby=3"])).is_err());
    assert!(Args::try_parse_from(make_args(&["init", "--tool-version", "python"])).is_err());
}

#[test]
fn test_wait_options() {
    let parsed = Args::try_parse_from(make_args(&["wait"])).unwrap();
    assert_eq!(parsed.command, Command::Wait {
        interval_ms: 500,
        timeout_secs: None,
        max_attempts: None
    });

    let parsed = Args::try_parse_from(make_args(&[
        "wait",
        "--interval-ms",
        "100",
        "--timeout-secs",
        "30",
        "--max-attempts",
        "5",
    ]))
    .unwrap();
    assert_eq!(parsed.command, Command::Wait {
        interval_ms: 100,
        timeout_secs: Some(30),
        max_attempts: Some(5)
    });

    assert!(Args::try_parse_from(make_args(&["wait", "--max-attempts", "0"])).is_err());
}

#[test]
fn test_missing_subcommand() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

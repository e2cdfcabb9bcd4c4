use std::io;

use devcontainer_utils::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ValidationError {
        violations: vec!["\"mounts\" is a required property".to_string(), "bad tool".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Invalid configuration: \"mounts\" is a required property; bad tool."
    );

    let err = Error::MountReferenceError { mount: "src".to_string(), folder: "api".to_string() };
    assert_eq!(err.to_string(), "Invalid mount reference: 'src' (folder: 'api').");

    let err = Error::UnsupportedSidecarError { image: "mysql:8".to_string() };
    assert_eq!(err.to_string(), "Unsupported sidecar: 'mysql:8'.");

    let err = Error::ReadinessTimeoutError { attempts: 3 };
    assert_eq!(err.to_string(), "Environment not ready after 3 attempts.");
}

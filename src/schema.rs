//! JSON Schema describing a valid configuration file.
//!
//! Validation runs against the raw JSON before any typed deserialization so that
//! every violated rule is reported at once.

use serde_json::{json, Value};

use crate::config::Plugin;
use crate::error::{Error, Result};

/// Two non-empty parts separated by a single colon (`plugin:version`, `image:tag`).
pub const NAME_TAG_PATTERN: &str = "^[^:]+:[^:]+$";

/// A folder path must reference at least one mount.
pub const PLACEHOLDER_PATTERN: &str = "\\{[^}]+\\}";

/// Package registry URLs.
pub const URL_PATTERN: &str = "^https?://";

/// Builds the configuration schema.
pub fn config_schema() -> Value {
    let plugins: Vec<&str> = Plugin::ALL.iter().map(|plugin| plugin.as_str()).collect();
    let url = json!({ "type": "string", "pattern": URL_PATTERN });

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["mounts", "folders"],
        "properties": {
            "tools": {
                "type": "array",
                "items": { "type": "string", "pattern": NAME_TAG_PATTERN }
            },
            "sidecars": {
                "type": "array",
                "items": { "type": "string", "pattern": NAME_TAG_PATTERN }
            },
            "mounts": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "folders": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "required": ["path"],
                    "properties": {
                        "path": { "type": "string", "pattern": PLACEHOLDER_PATTERN },
                        "tools": {
                            "type": "array",
                            "items": { "enum": plugins }
                        }
                    }
                }
            },
            "options": {
                "type": "object",
                "properties": {
                    "pypiServer": url,
                    "trustedPypiServers": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "extraPypiServers": {
                        "type": "array",
                        "items": url
                    },
                    "npmRegistry": url,
                    "useYarn": { "type": "boolean" }
                }
            }
        }
    })
}

/// Checks a raw configuration against the schema, collecting every violation.
pub fn validate(instance: &Value) -> Result<()> {
    let schema = config_schema();
    let validator =
        jsonschema::validator_for(&schema).map_err(|e| Error::SchemaError(e.to_string()))?;

    let violations: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_is_valid() {
        let config = json!({ "mounts": {}, "folders": {} });
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_all_violations_are_reported() {
        let config = json!({
            "tools": ["bogus", "python:3.11"],
            "sidecars": ["redis"],
            "folders": { "app": { "path": "no-placeholder", "tools": ["ruby"] } },
            "options": { "npmRegistry": "ftp://example.com" }
        });

        match validate(&config) {
            Err(Error::ValidationError { violations }) => {
                assert_eq!(violations.len(), 6, "{violations:?}");
                assert!(violations.iter().any(|v| v.contains("bogus")));
                assert!(violations.iter().any(|v| v.contains("mounts")));
                assert!(violations.iter().any(|v| v.contains("no-placeholder")));
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_with_extra_colon_is_rejected() {
        let config = json!({ "tools": ["python:3:11"], "mounts": {}, "folders": {} });
        assert!(validate(&config).is_err());
    }
}

//! Configuration file for the command line.
//!
//! The file is itself JSON and is validated with the same machinery as the
//! documents the tool checks. Unknown keys are rejected.

use std::path::Path;

use validated_json::prelude::*;

use crate::records::RecordKind;

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Label for error messages in place of the document path.
    pub label: Option<String>,
    pub record: Option<RecordKind>,
    /// Deny keys the record never reads.
    pub strict: bool,
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            label: None,
            record: None,
            strict: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl<'doc> ValidateJson<'doc> for CliConfig {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;

        let label = rec
            .optional_field::<String>("label")?
            .map(|label| label.non_empty())
            .transpose()?
            .map(Checked::into_inner);
        let record = rec
            .optional_field::<&str>("record")?
            .map(|record| record.member_of(&RecordKind::NAMES))
            .transpose()?
            .and_then(|record| RecordKind::from_name(record.into_inner()));
        let strict = rec.optional("strict", false)?.into_inner();
        let log_level = rec
            .optional("log-level", DEFAULT_LOG_LEVEL)?
            .member_of(&LOG_LEVELS)?
            .into_inner()
            .to_string();

        rec.deny_unknown_fields()?;

        Ok(CliConfig {
            label,
            record,
            strict,
            log_level,
        })
    }
}

impl CliConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let data = JsonData::from_file(path)?;
        data.validate()
    }

    /// Parse configuration from a string.
    pub fn parse_str(content: &str) -> Result<Self, ValidationError> {
        let data = JsonData::parse_str(content)?.with_label("configuration");
        data.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(CliConfig::parse_str("{}").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_all_fields() {
        let config = CliConfig::parse_str(
            r#"{"label": "settings", "record": "roster", "strict": true, "log-level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.label.as_deref(), Some("settings"));
        assert_eq!(config.record, Some(RecordKind::Roster));
        assert!(config.strict);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = CliConfig::parse_str(r#"{"log-level": "loud"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In configuration, value for key \"log-level\" must be one of: error warn info debug trace"
        );
    }

    #[test]
    fn test_rejects_unknown_record() {
        let err = CliConfig::parse_str(r#"{"record": "invoice"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In configuration, value for key \"record\" must be one of: my-data roster"
        );
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = CliConfig::parse_str(r#"{"strict": true, "base-dir": "."}"#).unwrap_err();
        assert_eq!(err.to_string(), "In configuration, unknown key \"base-dir\"");
    }

    #[test]
    fn test_rejects_empty_label() {
        let err = CliConfig::parse_str(r#"{"label": ""}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In configuration, value for key \"label\" must not be empty"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vjson.json");
        std::fs::write(&path, r#"{"strict": "yes"}"#).unwrap();
        let err = CliConfig::load(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "In {}, expected a boolean value for key \"strict\"",
                path.display()
            )
        );
    }
}

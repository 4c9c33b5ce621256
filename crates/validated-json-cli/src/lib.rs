//! Library side of the `vjson` command: argument and configuration handling,
//! logging setup, and the record types documents are validated as.

pub mod args;
pub mod config;
pub mod logging;
pub mod records;

use std::path::Path;

use tracing::{debug, info};
use validated_json::{JsonData, UnknownFields};

use crate::args::Cli;
use crate::config::CliConfig;
use crate::records::RecordKind;

/// Effective settings after command-line flags are layered over the
/// configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub label: Option<String>,
    pub record: RecordKind,
    pub unknown_fields: UnknownFields,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: CliConfig) -> Self {
        let strict = cli.strict || config.strict;
        Settings {
            label: cli.label.clone().or(config.label),
            record: cli.record.or(config.record).unwrap_or_default(),
            unknown_fields: if strict {
                UnknownFields::Deny
            } else {
                UnknownFields::Allow
            },
            log_level: logging::level_for(cli.verbose, &config.log_level).to_string(),
        }
    }
}

/// Load the configuration named on the command line, if any.
pub fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    match &cli.config {
        Some(path) => Ok(CliConfig::load(path)?),
        None => Ok(CliConfig::default()),
    }
}

/// Validate `file` with `settings` and return the rendered record.
pub fn run(file: &Path, settings: &Settings) -> anyhow::Result<String> {
    let mut data = JsonData::from_file(file)?;
    if let Some(label) = &settings.label {
        data = data.with_label(label.clone());
    }
    info!(
        file = %file.display(),
        record = settings.record.name(),
        "validating document"
    );
    let rendered = records::render(settings.record, &data, settings.unknown_fields)?;
    debug!(bytes = rendered.len(), "validation succeeded");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("vjson").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            label: Some("from config".to_string()),
            record: Some(RecordKind::Roster),
            strict: false,
            log_level: "error".to_string(),
        };
        let settings = Settings::resolve(
            &cli(&["doc.json", "--label", "from flag", "--record", "my-data", "-vv"]),
            config,
        );
        assert_eq!(settings.label.as_deref(), Some("from flag"));
        assert_eq!(settings.record, RecordKind::MyData);
        assert_eq!(settings.unknown_fields, UnknownFields::Allow);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_config_fills_gaps() {
        let config = CliConfig {
            label: Some("from config".to_string()),
            record: Some(RecordKind::Roster),
            strict: true,
            log_level: "error".to_string(),
        };
        let settings = Settings::resolve(&cli(&["doc.json"]), config);
        assert_eq!(settings.label.as_deref(), Some("from config"));
        assert_eq!(settings.record, RecordKind::Roster);
        assert_eq!(settings.unknown_fields, UnknownFields::Deny);
        assert_eq!(settings.log_level, "error");
    }

    #[test]
    fn test_run_uses_label_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"nested": {"age": 1}, "values": []}"#).unwrap();

        let settings = Settings::resolve(&cli(&["doc.json", "--label", "input"]), CliConfig::default());
        let err = run(&path, &settings).unwrap_err();
        assert_eq!(err.to_string(), "Required key \"description\" not found");

        std::fs::write(&path, r#"{"description": 1, "nested": {"age": 1}, "values": []}"#)
            .unwrap();
        let err = run(&path, &settings).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In input, expected a string value for key \"description\""
        );
    }
}

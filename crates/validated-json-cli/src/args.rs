//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::records::RecordKind;

/// Validate a JSON document against a typed record.
#[derive(Parser, Debug, Clone)]
#[command(name = "vjson", version, about)]
pub struct Cli {
    /// Path to the JSON document to validate
    pub file: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Label used in error messages instead of the file path
    #[arg(long)]
    pub label: Option<String>,

    /// Record type to validate the document as
    #[arg(short, long, value_enum)]
    pub record: Option<RecordKind>,

    /// Reject keys that the record does not read
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

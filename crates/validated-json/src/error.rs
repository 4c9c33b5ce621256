use std::path::PathBuf;

use crate::node::ValueKind;

/// Error raised while loading or validating a JSON document.
///
/// Every validation variant carries the source label of the document and the
/// field it was raised for, so messages read the same no matter how deeply the
/// failing field was nested.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The input stream could not be read.
    #[error("Invalid input stream for JSON data.")]
    InvalidStream(#[source] std::io::Error),

    /// The input was read but is not well-formed JSON.
    #[error("JSON parsing error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The file could not be opened for reading.
    #[error("Could not open JSON file: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required field is absent.
    #[error("Required key \"{field}\" not found")]
    MissingField { label: String, field: String },

    /// A field holds a value of the wrong type.
    #[error("In {label}, expected {expected} for key \"{field}\"")]
    TypeMismatch {
        label: String,
        field: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// The document root itself holds a value of the wrong type.
    #[error("In {label}, expected {expected} at the document root")]
    RootTypeMismatch {
        label: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("In {label}, value for key \"{field}\" is below minimum of {min}")]
    BelowMinimum {
        label: String,
        field: String,
        min: String,
    },

    #[error("In {label}, value for key \"{field}\" is above maximum of {max}")]
    AboveMaximum {
        label: String,
        field: String,
        max: String,
    },

    #[error("In {label}, value for key \"{field}\" is outside range {min} to {max}")]
    OutOfRange {
        label: String,
        field: String,
        min: String,
        max: String,
    },

    /// The value is not one of the permitted values (kept in declaration order).
    #[error("In {label}, value for key \"{field}\" must be one of: {}", permitted.join(" "))]
    NotPermitted {
        label: String,
        field: String,
        permitted: Vec<String>,
    },

    #[error("In {label}, filename value for key \"{field}\" does not exist: {}", path.display())]
    FileNotFound {
        label: String,
        field: String,
        path: PathBuf,
    },

    /// The filesystem could not answer whether the path exists.
    #[error("In {label}, filename value for key \"{field}\" could not be checked: {}", path.display())]
    FileCheckFailed {
        label: String,
        field: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("In {label}, value for key \"{field}\" does not match pattern {pattern}")]
    PatternMismatch {
        label: String,
        field: String,
        pattern: String,
    },

    #[error("In {label}, value for key \"{field}\" must not be empty")]
    Empty { label: String, field: String },

    /// A record was finished with unknown fields denied and this one was never read.
    #[error("In {label}, unknown key \"{field}\"")]
    UnknownField { label: String, field: String },

    #[error("In {label}, expected at least {expected} elements for key \"{field}\" but found {actual}")]
    TooFewElements {
        label: String,
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// The field this error was raised for, if it concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotPermitted { field, .. }
            | Self::FileNotFound { field, .. }
            | Self::FileCheckFailed { field, .. }
            | Self::PatternMismatch { field, .. }
            | Self::Empty { field, .. }
            | Self::UnknownField { field, .. }
            | Self::TooFewElements { field, .. } => Some(field),
            Self::InvalidStream(_)
            | Self::Parse(_)
            | Self::FileOpen { .. }
            | Self::RootTypeMismatch { .. } => None,
        }
    }

    /// The label of the document the error was raised in.
    ///
    /// Source errors happen before a document exists and have no label.
    pub fn source_label(&self) -> Option<&str> {
        match self {
            Self::MissingField { label, .. }
            | Self::TypeMismatch { label, .. }
            | Self::RootTypeMismatch { label, .. }
            | Self::BelowMinimum { label, .. }
            | Self::AboveMaximum { label, .. }
            | Self::OutOfRange { label, .. }
            | Self::NotPermitted { label, .. }
            | Self::FileNotFound { label, .. }
            | Self::FileCheckFailed { label, .. }
            | Self::PatternMismatch { label, .. }
            | Self::Empty { label, .. }
            | Self::UnknownField { label, .. }
            | Self::TooFewElements { label, .. } => Some(label),
            Self::InvalidStream(_) | Self::Parse(_) | Self::FileOpen { .. } => None,
        }
    }

    /// Whether the error comes from acquiring or parsing the document rather
    /// than from validating its contents.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidStream(_) | Self::Parse(_) | Self::FileOpen { .. }
        )
    }
}

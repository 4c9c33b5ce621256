//! Acquiring documents from readers, files, and strings.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::error::ValidationError;
use crate::node::Node;
use crate::validate::{UnknownFields, ValidateInPlace, ValidateJson, ValidationContext};

/// Label used for documents that do not come from a file.
pub const DEFAULT_LABEL: &str = "JSON data";

/// A fully parsed document together with the label its errors are reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonData {
    root: Value,
    label: String,
}

impl JsonData {
    /// Read the whole stream and parse it.
    ///
    /// Only I/O failures are stream errors. Bytes that are not valid UTF-8 or
    /// not well-formed JSON are reported as `Parse`.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ValidationError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(ValidationError::InvalidStream)?;
        Self::parse_slice(&bytes)
    }

    /// Open and parse a file. The document is labelled with the path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ValidationError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file)?.with_label(path.display().to_string()))
    }

    pub fn parse_str(text: &str) -> Result<Self, ValidationError> {
        Self::parse_slice(text.as_bytes())
    }

    pub fn parse_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let root = serde_json::from_slice(bytes).map_err(ValidationError::Parse)?;
        debug!(bytes = bytes.len(), "parsed JSON document");
        Ok(Self::from_value(root))
    }

    /// Wrap a value that is already parsed.
    pub fn from_value(root: Value) -> Self {
        Self {
            root,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node::new(&self.root)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Validation context at the document root.
    pub fn context(&self) -> ValidationContext<'_> {
        ValidationContext::new(self.root(), &self.label)
    }

    /// Validate the whole document as `T`.
    pub fn validate<'doc, T>(&'doc self) -> Result<T, ValidationError>
    where
        T: ValidateJson<'doc>,
    {
        self.validate_with_policy(UnknownFields::default())
    }

    /// Validate the whole document as `T`, applying `unknown_fields` to every
    /// record in it.
    pub fn validate_with_policy<'doc, T>(
        &'doc self,
        unknown_fields: UnknownFields,
    ) -> Result<T, ValidationError>
    where
        T: ValidateJson<'doc>,
    {
        self.context()
            .with_unknown_fields(unknown_fields)
            .validate::<T>()
            .inspect_err(|err| debug!(label = %self.label, %err, "validation failed"))
    }

    /// Validate the whole document into existing storage.
    pub fn validate_into<'doc, T>(&'doc self, target: &mut T) -> Result<(), ValidationError>
    where
        T: ValidateInPlace<'doc> + ?Sized,
    {
        self.context()
            .validate_into(target)
            .inspect_err(|err| debug!(label = %self.label, %err, "validation failed"))
    }
}

impl FromStr for JsonData {
    type Err = ValidationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_str(text)
    }
}

//! Typed, fail-fast validation of JSON documents.
//!
//! A record type describes its own field accesses by implementing
//! [`ValidateJson`]. Validation reads each field once, checks its type,
//! applies any constraints chained on the extracted value, and stops at the
//! first violation with a message naming the document and the field.
//!
//! ```
//! use validated_json::prelude::*;
//!
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl<'doc> ValidateJson<'doc> for Server {
//!     fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
//!         let rec = ctx.validate_record()?;
//!         let host = rec.optional_str("host", "localhost")?.into_inner();
//!         let port = rec.required::<u16>("port")?.above_min(1024)?.into_inner();
//!         rec.finish()?;
//!         Ok(Server { host, port })
//!     }
//! }
//!
//! let data: JsonData = r#"{"port": 8080}"#.parse().unwrap();
//! let server: Server = data.validate().unwrap();
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 8080);
//!
//! let data: JsonData = r#"{"port": 80}"#.parse().unwrap();
//! let err = data.validate::<Server>().err().unwrap();
//! assert_eq!(
//!     err.to_string(),
//!     "In JSON data, value for key \"port\" is below minimum of 1024"
//! );
//! ```

/// Chainable constraints over extracted values.
pub mod checked;

/// Errors raised while loading or validating documents.
pub mod error;

/// Read-only view over parsed JSON values.
pub mod node;

/// Document acquisition from readers, files, and strings.
pub mod source;

/// Traits and contexts for typed extraction.
pub mod validate;

pub use checked::{Checked, Provenance};
pub use error::ValidationError;
pub use node::{Node, ValueKind};
pub use source::{DEFAULT_LABEL, JsonData};
pub use validate::{
    FixedBlock, RecordValidator, UnknownFields, ValidateInPlace, ValidateJson, ValidationContext,
};

pub mod prelude {
    pub use crate::checked::Checked;
    pub use crate::error::ValidationError;
    pub use crate::source::JsonData;
    pub use crate::validate::{
        FixedBlock, RecordValidator, UnknownFields, ValidateInPlace, ValidateJson,
        ValidationContext,
    };
}

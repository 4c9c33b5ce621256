//! Constraint chains over already-extracted values.
//!
//! Every extraction returns a [`Checked`] value. Constraints consume it and hand
//! it back unchanged on success, so they compose left to right with `?`:
//!
//! ```ignore
//! let port = rec.required::<u16>("port")?.within_range(1024, 65535)?.into_inner();
//! ```
//!
//! The first failing constraint in written order is the one reported.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ValidationError;

/// Where a value came from: the document's source label and the field name.
///
/// Only used to build error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Provenance<'doc> {
    label: &'doc str,
    field: &'doc str,
}

impl<'doc> Provenance<'doc> {
    pub fn new(label: &'doc str, field: &'doc str) -> Self {
        Self { label, field }
    }

    pub fn label(&self) -> &'doc str {
        self.label
    }

    pub fn field(&self) -> &'doc str {
        self.field
    }
}

/// An extracted value together with its provenance.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Checked<'doc, T> {
    value: T,
    provenance: Provenance<'doc>,
}

impl<'doc, T> Checked<'doc, T> {
    pub fn new(value: T, provenance: Provenance<'doc>) -> Self {
        Self { value, provenance }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn provenance(&self) -> Provenance<'doc> {
        self.provenance
    }

    /// Unwrap the validated value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the carried value, keeping its provenance.
    pub fn map<U, F>(self, f: F) -> Checked<'doc, U>
    where
        F: FnOnce(T) -> U,
    {
        Checked {
            value: f(self.value),
            provenance: self.provenance,
        }
    }

    /// Pass the value through if `predicate` holds, otherwise fail with the
    /// error built from the provenance.
    pub fn ensure<P, E>(self, predicate: P, error: E) -> Result<Self, ValidationError>
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(Provenance<'doc>) -> ValidationError,
    {
        if predicate(&self.value) {
            Ok(self)
        } else {
            Err(error(self.provenance))
        }
    }

    fn reject<P, E>(self, violated: P, error: E) -> Result<Self, ValidationError>
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(Provenance<'doc>) -> ValidationError,
    {
        if violated(&self.value) {
            Err(error(self.provenance))
        } else {
            Ok(self)
        }
    }
}

impl<T> Checked<'_, T>
where
    T: PartialOrd + Display,
{
    /// Fail with `BelowMinimum` if the value is less than `min`.
    pub fn above_min(self, min: T) -> Result<Self, ValidationError> {
        self.reject(
            |value| *value < min,
            |p| ValidationError::BelowMinimum {
                label: p.label.to_string(),
                field: p.field.to_string(),
                min: min.to_string(),
            },
        )
    }

    /// Fail with `AboveMaximum` if the value is greater than `max`.
    pub fn below_max(self, max: T) -> Result<Self, ValidationError> {
        self.reject(
            |value| *value > max,
            |p| ValidationError::AboveMaximum {
                label: p.label.to_string(),
                field: p.field.to_string(),
                max: max.to_string(),
            },
        )
    }

    /// Fail with a single `OutOfRange` error if the value is outside `[min, max]`.
    pub fn within_range(self, min: T, max: T) -> Result<Self, ValidationError> {
        self.reject(
            |value| *value < min || *value > max,
            |p| ValidationError::OutOfRange {
                label: p.label.to_string(),
                field: p.field.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            },
        )
    }
}

impl<T> Checked<'_, T>
where
    T: PartialEq + Display,
{
    /// Fail with `NotPermitted` unless the value equals one of `permitted`.
    pub fn member_of(self, permitted: &[T]) -> Result<Self, ValidationError> {
        self.ensure(
            |value| permitted.contains(value),
            |p| ValidationError::NotPermitted {
                label: p.label.to_string(),
                field: p.field.to_string(),
                permitted: permitted.iter().map(ToString::to_string).collect(),
            },
        )
    }
}

impl<T> Checked<'_, T>
where
    T: AsRef<str>,
{
    /// Treat the value as a path, joined onto `prefix` when one is given, and
    /// fail with `FileNotFound` if nothing exists there.
    ///
    /// Symlinks are followed, so a dangling link does not exist. When the
    /// filesystem cannot answer (permission denied, a file used as a
    /// directory, an invalid name) the error is `FileCheckFailed` carrying the
    /// underlying I/O error. Only queries the filesystem.
    pub fn is_existing_file(self, prefix: Option<&Path>) -> Result<Self, ValidationError> {
        let path = match prefix {
            Some(prefix) => prefix.join(self.value.as_ref()),
            None => PathBuf::from(self.value.as_ref()),
        };
        match path.try_exists() {
            Ok(true) => Ok(self),
            Ok(false) => Err(ValidationError::FileNotFound {
                label: self.provenance.label.to_string(),
                field: self.provenance.field.to_string(),
                path,
            }),
            Err(source) => Err(ValidationError::FileCheckFailed {
                label: self.provenance.label.to_string(),
                field: self.provenance.field.to_string(),
                path,
                source,
            }),
        }
    }

    /// Fail with `PatternMismatch` unless `pattern` matches the value.
    pub fn matches(self, pattern: &Regex) -> Result<Self, ValidationError> {
        self.ensure(
            |value| pattern.is_match(value.as_ref()),
            |p| ValidationError::PatternMismatch {
                label: p.label.to_string(),
                field: p.field.to_string(),
                pattern: pattern.as_str().to_string(),
            },
        )
    }

    pub fn non_empty(self) -> Result<Self, ValidationError> {
        self.ensure(
            |value| !value.as_ref().is_empty(),
            |p| ValidationError::Empty {
                label: p.label.to_string(),
                field: p.field.to_string(),
            },
        )
    }
}

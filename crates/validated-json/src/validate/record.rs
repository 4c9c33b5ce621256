//! RecordValidator for extracting named fields from JSON objects.

use std::cell::RefCell;
use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::checked::{Checked, Provenance};
use crate::error::ValidationError;
use crate::node::{Node, ValueKind};

use super::{UnknownFields, ValidateInPlace, ValidateJson, ValidationContext};

/// Field-by-field access to an object node.
///
/// Every lookup, found or not, marks the name as accessed so that
/// [`finish`](Self::finish) can tell which members were never read.
///
/// # Example
///
/// ```ignore
/// impl<'doc> ValidateJson<'doc> for MyData {
///     fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
///         let rec = ctx.validate_record()?;
///         let name = rec.optional_str("name", "No name provided")?.into_inner();
///         let description = rec.required::<String>("description")?.into_inner();
///         rec.finish()?;
///         Ok(MyData { name, description })
///     }
/// }
/// ```
#[must_use]
#[derive(Debug)]
pub struct RecordValidator<'doc> {
    map: &'doc Map<String, Value>,
    ctx: ValidationContext<'doc>,
    accessed: RefCell<HashSet<&'doc str>>,
}

impl<'doc> RecordValidator<'doc> {
    pub(crate) fn new(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        match ctx.node().value() {
            Value::Object(map) => Ok(Self {
                map,
                ctx: *ctx,
                accessed: RefCell::default(),
            }),
            _ => Err(ctx.type_mismatch(ValueKind::Object)),
        }
    }

    fn mark_accessed(&self, name: &'doc str) {
        self.accessed.borrow_mut().insert(name);
    }

    /// The context of the object itself.
    pub fn context(&self) -> &ValidationContext<'doc> {
        &self.ctx
    }

    /// Get the context of a required field without extracting it.
    ///
    /// Returns `MissingField` if the field is not present.
    pub fn field(&self, name: &'doc str) -> Result<ValidationContext<'doc>, ValidationError> {
        self.field_optional(name)
            .ok_or_else(|| ValidationError::MissingField {
                label: self.ctx.label().to_string(),
                field: name.to_string(),
            })
    }

    /// Get the context of an optional field without extracting it.
    pub fn field_optional(&self, name: &'doc str) -> Option<ValidationContext<'doc>> {
        self.mark_accessed(name);
        self.map
            .get(name)
            .map(|value| self.ctx.child(Node::new(value), name))
    }

    /// Extract a required field as `T`.
    pub fn required<T>(&self, name: &'doc str) -> Result<Checked<'doc, T>, ValidationError>
    where
        T: ValidateJson<'doc>,
    {
        let ctx = self.field(name)?;
        let value = ctx.validate::<T>()?;
        Ok(ctx.checked(value))
    }

    pub fn required_with<T, F>(
        &self,
        name: &'doc str,
        parser: F,
    ) -> Result<Checked<'doc, T>, ValidationError>
    where
        F: FnMut(&ValidationContext<'doc>) -> Result<T, ValidationError>,
    {
        let ctx = self.field(name)?;
        let value = ctx.validate_with(parser)?;
        Ok(ctx.checked(value))
    }

    /// Extract an optional field as `T`, falling back to `default` when absent.
    ///
    /// A present field is validated exactly as [`required`](Self::required)
    /// would; the default itself is never validated.
    pub fn optional<T>(
        &self,
        name: &'doc str,
        default: T,
    ) -> Result<Checked<'doc, T>, ValidationError>
    where
        T: ValidateJson<'doc>,
    {
        Ok(self
            .optional_field(name)?
            .unwrap_or_else(|| Checked::new(default, Provenance::new(self.ctx.label(), name))))
    }

    /// [`optional`](Self::optional) for an owned string with a literal default.
    pub fn optional_str(
        &self,
        name: &'doc str,
        default: &str,
    ) -> Result<Checked<'doc, String>, ValidationError> {
        self.optional(name, default.to_string())
    }

    /// Extract an optional field, returning `None` when it is absent.
    pub fn optional_field<T>(
        &self,
        name: &'doc str,
    ) -> Result<Option<Checked<'doc, T>>, ValidationError>
    where
        T: ValidateJson<'doc>,
    {
        self.field_optional(name)
            .map(|ctx| ctx.validate::<T>().map(|value| ctx.checked(value)))
            .transpose()
    }

    pub fn optional_with<T, F>(
        &self,
        name: &'doc str,
        parser: F,
    ) -> Result<Option<Checked<'doc, T>>, ValidationError>
    where
        F: FnMut(&ValidationContext<'doc>) -> Result<T, ValidationError>,
    {
        self.field_optional(name)
            .map(|ctx| ctx.validate_with(parser).map(|value| ctx.checked(value)))
            .transpose()
    }

    /// Validate a required field into existing storage.
    pub fn required_into<T>(&self, name: &'doc str, target: &mut T) -> Result<(), ValidationError>
    where
        T: ValidateInPlace<'doc> + ?Sized,
    {
        self.field(name)?.validate_into(target)
    }

    /// Members that have not been accessed so far, in document map order.
    pub fn unknown_fields(
        &self,
    ) -> impl Iterator<Item = (&'doc str, ValidationContext<'doc>)> + use<'doc> {
        let accessed = self.accessed.borrow().clone();
        let ctx = self.ctx;
        let map = self.map;
        map.iter()
            .filter(move |(name, _)| !accessed.contains(name.as_str()))
            .map(move |(name, value)| (name.as_str(), ctx.child(Node::new(value), name)))
    }

    /// Finish with the Deny policy: fail on the first member never accessed.
    pub fn deny_unknown_fields(self) -> Result<(), ValidationError> {
        match self.unknown_fields().next() {
            Some((name, _)) => Err(ValidationError::UnknownField {
                label: self.ctx.label().to_string(),
                field: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Finish with the Allow policy.
    pub fn allow_unknown_fields(self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Finish with whatever policy the context carries.
    pub fn finish(self) -> Result<(), ValidationError> {
        match self.ctx.unknown_fields() {
            UnknownFields::Allow => self.allow_unknown_fields(),
            UnknownFields::Deny => self.deny_unknown_fields(),
        }
    }
}

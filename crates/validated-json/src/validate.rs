//! Typed extraction of values from document nodes.
//!
//! [`ValidateJson`] is implemented for every supported target type: the
//! scalars, `Vec<T>`, raw nodes, and any record type that opens a
//! [`RecordValidator`] on its context. Nesting is plain recursion: a record
//! field is validated by running the field type's own `validate` against a
//! child context.

mod block;
mod record;

pub use block::FixedBlock;
pub use record::RecordValidator;

use serde_json::Value;
use tracing::trace;

use crate::checked::{Checked, Provenance};
use crate::error::ValidationError;
use crate::node::{Node, ValueKind};

/// What [`RecordValidator::finish`] does with members that were never read.
///
/// The policy is inherited by every child context, so one setting governs a
/// whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    #[default]
    Allow,
    Deny,
}

/// Position of a validation: the node being read, plus what is needed to
/// attribute errors to it.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'doc> {
    node: Node<'doc>,
    label: &'doc str,
    /// `None` at the document root.
    field: Option<&'doc str>,
    unknown_fields: UnknownFields,
}

impl<'doc> ValidationContext<'doc> {
    /// Context for the root of a document with the given source label.
    pub fn new(node: Node<'doc>, label: &'doc str) -> Self {
        Self {
            node,
            label,
            field: None,
            unknown_fields: UnknownFields::default(),
        }
    }

    pub fn with_unknown_fields(self, unknown_fields: UnknownFields) -> Self {
        Self {
            unknown_fields,
            ..self
        }
    }

    pub fn node(&self) -> Node<'doc> {
        self.node
    }

    pub fn label(&self) -> &'doc str {
        self.label
    }

    pub fn field(&self) -> Option<&'doc str> {
        self.field
    }

    /// The field name used in messages; empty at the root.
    pub fn field_name(&self) -> &'doc str {
        self.field.unwrap_or("")
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    pub fn provenance(&self) -> Provenance<'doc> {
        Provenance::new(self.label, self.field_name())
    }

    /// Context for the member `field` of this node, found at `node`.
    pub fn child(&self, node: Node<'doc>, field: &'doc str) -> Self {
        Self {
            node,
            field: Some(field),
            ..*self
        }
    }

    /// Context for an array element. Elements are attributed to the field
    /// that holds the array.
    pub fn element(&self, node: Node<'doc>) -> Self {
        Self { node, ..*self }
    }

    /// Wrap an already extracted value with this context's provenance.
    pub fn checked<T>(&self, value: T) -> Checked<'doc, T> {
        Checked::new(value, self.provenance())
    }

    /// The error for a node that is not of the `expected` kind.
    ///
    /// At the root there is no key to name, so the error points at the
    /// document root instead.
    pub fn type_mismatch(&self, expected: ValueKind) -> ValidationError {
        match self.field {
            None => ValidationError::RootTypeMismatch {
                label: self.label.to_string(),
                expected,
                actual: self.node.kind(),
            },
            Some(field) => ValidationError::TypeMismatch {
                label: self.label.to_string(),
                field: field.to_string(),
                expected,
                actual: self.node.kind(),
            },
        }
    }

    /// Validate this node as `T`.
    pub fn validate<T: ValidateJson<'doc>>(&self) -> Result<T, ValidationError> {
        trace!(
            field = self.field_name(),
            target = std::any::type_name::<T>(),
            "validating"
        );
        T::validate(self)
    }

    /// Validate this node with a closure instead of a [`ValidateJson`] impl.
    pub fn validate_with<T, F>(&self, mut parser: F) -> Result<T, ValidationError>
    where
        F: FnMut(&ValidationContext<'doc>) -> Result<T, ValidationError>,
    {
        parser(self)
    }

    /// Open this node as a record. Fails unless the node is an object.
    pub fn validate_record(&self) -> Result<RecordValidator<'doc>, ValidationError> {
        RecordValidator::new(self)
    }

    /// Validate this node into existing storage.
    pub fn validate_into<T>(&self, target: &mut T) -> Result<(), ValidationError>
    where
        T: ValidateInPlace<'doc> + ?Sized,
    {
        target.validate_in_place(self)
    }
}

/// Types that can be extracted from a document node.
///
/// Reference types may borrow from the document through `'doc`; owned types
/// implement this for any lifetime.
///
/// # Example
///
/// ```ignore
/// impl<'doc> ValidateJson<'doc> for Nested {
///     fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
///         let rec = ctx.validate_record()?;
///         let age = rec.required::<i64>("age")?.above_min(0)?.into_inner();
///         rec.finish()?;
///         Ok(Nested { age })
///     }
/// }
/// ```
pub trait ValidateJson<'doc>: Sized {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError>;
}

/// Types that can be validated into caller-supplied storage.
///
/// Used where the target already has a fixed place, such as the slots of a
/// [`FixedBlock`]. On failure the target may be partly written.
pub trait ValidateInPlace<'doc> {
    fn validate_in_place(&mut self, ctx: &ValidationContext<'doc>) -> Result<(), ValidationError>;
}

impl<'doc> ValidateJson<'doc> for &'doc str {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        ctx.node()
            .as_str()
            .ok_or_else(|| ctx.type_mismatch(ValueKind::String))
    }
}

impl ValidateJson<'_> for String {
    fn validate(ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
        ctx.validate::<&str>().map(String::from)
    }
}

impl ValidateJson<'_> for bool {
    fn validate(ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
        ctx.node()
            .as_bool()
            .ok_or_else(|| ctx.type_mismatch(ValueKind::Bool))
    }
}

// Integer targets take integer literals only, and only when the value fits.
macro_rules! impl_validate_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ValidateJson<'_> for $ty {
                fn validate(ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
                    let node = ctx.node();
                    node.as_i64()
                        .and_then(|value| <$ty>::try_from(value).ok())
                        .or_else(|| node.as_u64().and_then(|value| <$ty>::try_from(value).ok()))
                        .ok_or_else(|| ctx.type_mismatch(ValueKind::Integer))
                }
            }
        )*
    };
}

impl_validate_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl ValidateJson<'_> for f64 {
    fn validate(ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
        ctx.node()
            .as_f64()
            .ok_or_else(|| ctx.type_mismatch(ValueKind::Double))
    }
}

impl ValidateJson<'_> for f32 {
    fn validate(ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
        // JSON numbers are finite, so an infinite result means the value does not fit.
        let value = ctx.validate::<f64>()? as f32;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ctx.type_mismatch(ValueKind::Double))
        }
    }
}

impl<'doc, T> ValidateJson<'doc> for Vec<T>
where
    T: ValidateJson<'doc>,
{
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let node = ctx.node();
        if !node.is_array() {
            return Err(ctx.type_mismatch(ValueKind::Array));
        }
        node.elements()
            .enumerate()
            .map(|(index, element)| {
                ctx.element(element).validate::<T>().inspect_err(|_| {
                    trace!(field = ctx.field_name(), index, "array element rejected");
                })
            })
            .collect()
    }
}

impl<'doc> ValidateJson<'doc> for Node<'doc> {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        Ok(ctx.node())
    }
}

impl<'doc> ValidateJson<'doc> for &'doc Value {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        Ok(ctx.node().value())
    }
}

impl ValidateJson<'_> for Value {
    fn validate(ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
        Ok(ctx.node().value().clone())
    }
}

macro_rules! impl_validate_in_place {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ValidateInPlace<'_> for $ty {
                fn validate_in_place(
                    &mut self,
                    ctx: &ValidationContext<'_>,
                ) -> Result<(), ValidationError> {
                    *self = ctx.validate()?;
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_in_place!(String, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<'doc, T> ValidateInPlace<'doc> for Vec<T>
where
    T: ValidateJson<'doc>,
{
    fn validate_in_place(&mut self, ctx: &ValidationContext<'doc>) -> Result<(), ValidationError> {
        *self = ctx.validate()?;
        Ok(())
    }
}

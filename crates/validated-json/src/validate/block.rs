//! Fixed-capacity targets filled from a counted array.

use crate::error::ValidationError;
use crate::node::ValueKind;

use super::{RecordValidator, ValidateInPlace};

/// `N` pre-allocated slots of which the first `count` are live.
///
/// Slots past `count` keep whatever they held before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedBlock<T, const N: usize> {
    slots: [T; N],
    count: usize,
}

impl<T: Default, const N: usize> Default for FixedBlock<T, N> {
    fn default() -> Self {
        Self::new(core::array::from_fn(|_| T::default()))
    }
}

impl<T, const N: usize> FixedBlock<T, N> {
    pub const CAPACITY: usize = N;

    /// A block with no live slots over the given storage.
    pub fn new(slots: [T; N]) -> Self {
        Self { slots, count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The live slots.
    pub fn live(&self) -> &[T] {
        &self.slots[..self.count]
    }

    /// All slots, live or not.
    pub fn slots(&self) -> &[T; N] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [T; N] {
        &mut self.slots
    }
}

impl<'doc> RecordValidator<'doc> {
    /// Fill `block` from `array_field`, using `count_field` to decide how many
    /// elements are read.
    ///
    /// The count must lie in `[1, N]` and the array must hold at least that
    /// many elements. Element `i` is validated in place into slot `i`; extra
    /// elements are ignored. The block's count is only updated on success.
    pub fn fixed_block<T, const N: usize>(
        &self,
        count_field: &'doc str,
        array_field: &'doc str,
        block: &mut FixedBlock<T, N>,
    ) -> Result<usize, ValidationError>
    where
        T: ValidateInPlace<'doc>,
    {
        let count = self
            .required::<usize>(count_field)?
            .within_range(1, N)?
            .into_inner();

        let array = self.field(array_field)?;
        let node = array.node();
        if !node.is_array() {
            return Err(array.type_mismatch(ValueKind::Array));
        }
        if node.len() < count {
            return Err(ValidationError::TooFewElements {
                label: array.label().to_string(),
                field: array_field.to_string(),
                expected: count,
                actual: node.len(),
            });
        }

        for (slot, element) in block.slots.iter_mut().zip(node.elements()).take(count) {
            array.element(element).validate_into(slot)?;
        }
        block.count = count;
        Ok(count)
    }
}

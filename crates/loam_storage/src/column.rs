//! Type-erased component columns.
//!
//! The entity store registers component schemas at runtime, so one
//! registry has to own backing arrays whose element types differ. Each
//! component is stored in a [`TypedColumn<T>`] behind the object-safe
//! [`Column`] trait; element size and alignment come from the type
//! parameter rather than a runtime byte count, and accesses downcast
//! through `Any` so a wrong element type is caught instead of misread.

use std::any::Any;

use crate::array::GrowArray;

/// A value that can be stored as a component.
///
/// New slots are default-initialized when an entity is created, so
/// component types supply their own blank state.
pub trait Component: Default + 'static {}

impl<T: Default + 'static> Component for T {}

/// Uniform interface over the per-component backing arrays.
///
/// Lifecycle operations go through this trait so the store can keep every
/// column of a type in lockstep without knowing element types; data access
/// goes through the `Any` hooks and a typed downcast.
pub(crate) trait Column {
    /// Appends one default-initialized slot.
    fn push_default(&mut self);

    /// Removes the slot at `index`, shifting later slots left by one.
    fn remove_at(&mut self, index: usize);

    /// Drops every slot, keeping capacity.
    fn clear(&mut self);

    /// Number of live slots.
    fn len(&self) -> usize;

    /// Element type name, for mismatch diagnostics.
    fn element_type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A component column with a concrete element type.
pub(crate) struct TypedColumn<T: Component> {
    items: GrowArray<T>,
}

impl<T: Component> TypedColumn<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: GrowArray::new(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        self.items.as_mut_slice()
    }
}

impl<T: Component> Column for TypedColumn<T> {
    fn push_default(&mut self) {
        self.items.grow(1);
    }

    fn remove_at(&mut self, index: usize) {
        self.items.remove_at(index);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn element_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Downcasts a column to its concrete element type.
pub(crate) fn downcast<T: Component>(column: &dyn Column) -> Option<&TypedColumn<T>> {
    column.as_any().downcast_ref::<TypedColumn<T>>()
}

/// Downcasts a column to its concrete element type, mutably.
pub(crate) fn downcast_mut<T: Component>(column: &mut dyn Column) -> Option<&mut TypedColumn<T>> {
    column.as_any_mut().downcast_mut::<TypedColumn<T>>()
}

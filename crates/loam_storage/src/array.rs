//! Growable sequence with explicit capacity-doubling.
//!
//! `GrowArray` is the base primitive every other container in this crate
//! is built on: hash table slot storage is rehashed into fresh arrays, and
//! each entity component is backed by one `GrowArray` per type.
//!
//! Capacity starts at 1 and doubles whenever an append would exceed it, so
//! amortized append cost stays constant and the doubling policy is
//! observable for tests. Out-of-range indices on removal and insertion are
//! defensive no-ops, never panics.

use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// A growable sequence of fixed-size elements.
///
/// Differs from a bare `Vec` in its documented growth policy (capacity 1
/// at creation, doubling growth) and its failure semantics: out-of-range
/// `remove_at`/`insert_at` are logged no-ops rather than panics.
///
/// References into the array are invalidated by any growing operation;
/// the borrow checker enforces re-acquisition.
#[derive(Clone)]
pub struct GrowArray<T> {
    items: Vec<T>,
}

impl<T> GrowArray<T> {
    /// Creates an empty array with capacity 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(1),
        }
    }

    /// Returns the number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the current capacity in elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Doubles capacity until `needed` elements fit.
    fn make_room(&mut self, needed: usize) {
        let mut capa = self.items.capacity().max(1);
        while capa < needed {
            capa *= 2;
        }
        if capa > self.items.capacity() {
            self.items.reserve_exact(capa - self.items.len());
        }
    }

    /// Appends `n` default-initialized elements.
    pub fn grow(&mut self, n: usize)
    where
        T: Default,
    {
        self.make_room(self.items.len() + n);
        self.items.resize_with(self.items.len() + n, T::default);
    }

    /// Appends one element.
    pub fn push(&mut self, value: T) {
        self.make_room(self.items.len() + 1);
        self.items.push(value);
    }

    /// Removes and returns the last element; `None` on an empty array.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Inserts `value` at `index`, shifting later elements right by one.
    ///
    /// `index == len` appends. An index past the end is a logged no-op.
    pub fn insert_at(&mut self, index: usize, value: T) {
        if index > self.items.len() {
            log::warn!(
                "insert_at: index {index} out of bounds (len {})",
                self.items.len()
            );
            return;
        }
        self.make_room(self.items.len() + 1);
        self.items.insert(index, value);
    }

    /// Removes and returns the element at `index`, shifting later
    /// elements left by one.
    ///
    /// An out-of-range index is a logged no-op returning `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            log::warn!(
                "remove_at: index {index} out of bounds (len {})",
                self.items.len()
            );
            return None;
        }
        Some(self.items.remove(index))
    }

    /// Resets length to 0 without releasing capacity.
    ///
    /// The fast path for per-frame reuse (e.g. draw-request accumulators).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns a reference to the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Returns the last element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Views the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Views the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns a mutable iterator over the elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> Default for GrowArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for GrowArray<T> {}

impl<T> Index<usize> for GrowArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for GrowArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> FromIterator<T> for GrowArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        for item in iter {
            arr.push(item);
        }
        arr
    }
}

impl<'a, T> IntoIterator for &'a GrowArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for GrowArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

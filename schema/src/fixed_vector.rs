//! Bounded sequence with a fixed capacity.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::CapacityError;

/// A growable sequence with a capacity fixed at construction.
///
/// Replicated sequences are bounded so their encoded form can carry small
/// fixed-width sizes; the codec additionally caps usable capacity at its own
/// wire limit. Equality compares contents only, not capacity.
#[derive(Clone)]
pub struct FixedVector<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T> FixedVector<T> {
    /// Creates an empty vector with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Creates a vector with the given capacity holding `items`.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `items` is longer than `capacity`.
    pub fn with_items(capacity: usize, items: impl Into<Vec<T>>) -> Result<Self, CapacityError> {
        let items = items.into();
        if items.len() > capacity {
            return Err(CapacityError {
                capacity,
                attempted: items.len(),
            });
        }
        Ok(Self { capacity, items })
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when the vector is full.
    pub fn try_push(&mut self, value: T) -> Result<(), CapacityError> {
        if self.items.len() == self.capacity {
            return Err(CapacityError {
                capacity: self.capacity,
                attempted: self.items.len() + 1,
            });
        }
        self.items.push(value);
        Ok(())
    }

    /// Appends an element, debug-asserting the capacity contract.
    ///
    /// In release builds a push past capacity is dropped.
    pub fn push(&mut self, value: T) {
        let result = self.try_push(value);
        debug_assert!(result.is_ok(), "push past fixed capacity {}", self.capacity);
    }

    /// Removes all elements; capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Shortens the vector to at most `len` elements.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> Deref for FixedVector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for FixedVector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T: PartialEq> PartialEq for FixedVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for FixedVector<T> {}

impl<T: fmt::Debug> fmt::Debug for FixedVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedVector")
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let v = FixedVector::<i32>::new(5);
        assert!(v.is_empty());
        assert_eq!(v.capacity(), 5);
    }

    #[test]
    fn with_items_within_capacity() {
        let v = FixedVector::with_items(10, vec![1, 2, 3]).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.capacity(), 10);
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn with_items_over_capacity_fails() {
        let result = FixedVector::with_items(2, vec![1, 2, 3]);
        assert_eq!(
            result.unwrap_err(),
            CapacityError {
                capacity: 2,
                attempted: 3
            }
        );
    }

    #[test]
    fn try_push_stops_at_capacity() {
        let mut v = FixedVector::new(2);
        v.try_push(1).unwrap();
        v.try_push(2).unwrap();
        assert!(v.try_push(3).is_err());
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn equality_ignores_capacity() {
        let a = FixedVector::with_items(10, vec![1, 2, 3]).unwrap();
        let b = FixedVector::with_items(5, vec![1, 2, 3]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn truncate_and_clear() {
        let mut v = FixedVector::with_items(10, vec![1, 2, 3, 4]).unwrap();
        v.truncate(2);
        assert_eq!(v.as_slice(), &[1, 2]);
        v.truncate(5);
        assert_eq!(v.len(), 2);
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    fn deref_to_slice() {
        let mut v = FixedVector::with_items(4, vec![5, 6, 7]).unwrap();
        assert_eq!(v[1], 6);
        v[1] = 60;
        assert_eq!(v.as_slice(), &[5, 60, 7]);
        assert_eq!(v.iter().sum::<i32>(), 72);
    }
}

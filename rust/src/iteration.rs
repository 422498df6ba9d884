//! Iterator implementations for GapTree.
//!
//! Iteration walks the slot array front to back and skips gaps. The
//! [`Iter`] handed out by [`GapTree::iter`] holds the tree's lock until it
//! is dropped, so the tree cannot change underneath it. Calling another
//! method on the same tree while the iterator is alive deadlocks; collect
//! with [`GapTree::to_vec`] first when the loop body needs the tree.

use parking_lot::MutexGuard;

use crate::error::{GapResult, GapTreeError};
use crate::tree::GapTree;
use crate::types::{RawGapTree, Slot};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Borrowing iterator over the elements of a [`RawGapTree`].
pub struct RawIter<'a, T> {
    slots: std::slice::Iter<'a, Slot<T>>,
    remaining: usize,
}

/// Iterator over clones of the elements of a [`GapTree`], holding its lock.
pub struct Iter<'a, T> {
    guard: MutexGuard<'a, RawGapTree<T>>,
    position: usize,
    remaining: usize,
}

/// Owning iterator over the elements of a [`GapTree`].
pub struct IntoIter<T> {
    slots: std::vec::IntoIter<Slot<T>>,
    remaining: usize,
}

// ============================================================================
// RAW TREE ITERATION AND COPYING
// ============================================================================

impl<T> RawGapTree<T> {
    /// Returns an iterator over all elements in sorted order.
    pub fn iter(&self) -> RawIter<'_, T> {
        RawIter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    /// Collect every element into a vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Collect at most `limit` elements from the front.
    pub fn to_vec_limited(&self, limit: usize) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().take(limit).cloned().collect()
    }

    /// Copy every element into `dest` starting at `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> GapResult<usize>
    where
        T: Clone,
    {
        self.copy_n_to(dest, offset, self.count)
    }

    /// Copy the first `count` elements into `dest` starting at `offset`.
    /// Returns the number of elements written.
    pub fn copy_n_to(&self, dest: &mut [T], offset: usize, count: usize) -> GapResult<usize>
    where
        T: Clone,
    {
        let count = count.min(self.count);
        let available = dest.len().saturating_sub(offset);
        if count > available {
            return Err(GapTreeError::DestinationTooSmall {
                required: count,
                available,
            });
        }
        for (target, item) in dest.iter_mut().skip(offset).zip(self.iter().take(count)) {
            *target = item.clone();
        }
        Ok(count)
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.slots.by_ref().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for RawIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.slots.by_ref().rev().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<T> ExactSizeIterator for RawIter<'_, T> {}

impl<'a, T> IntoIterator for &'a RawGapTree<T> {
    type Item = &'a T;
    type IntoIter = RawIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// LOCKED ITERATION
// ============================================================================

impl<T: Clone> GapTree<T> {
    /// Returns an iterator over clones of all elements in sorted order.
    ///
    /// The tree stays locked until the iterator is dropped.
    pub fn iter(&self) -> Iter<'_, T> {
        let guard = self.lock();
        let remaining = guard.len();
        Iter {
            guard,
            position: 0,
            remaining,
        }
    }
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let slots = &self.guard.slots;
        while self.position < slots.len() {
            let slot = &slots[self.position];
            self.position += 1;
            if let Some(item) = slot {
                self.remaining -= 1;
                return Some(item.clone());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Clone> IntoIterator for &'a GapTree<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for GapTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let raw = self.into_raw();
        IntoIter {
            remaining: raw.count,
            slots: raw.slots.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.slots.find_map(|slot| slot)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

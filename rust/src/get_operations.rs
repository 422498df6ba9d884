//! GET operations for GapTree.

use crate::types::{RawGapTree, WalkMode};

impl<T> RawGapTree<T> {
    /// Returns true if an element `==` to `item` is stored.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.walk(item, WalkMode::Locate).is_some()
    }

    /// Returns the stored element `==` to `item`.
    pub fn get(&self, item: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.walk(item, WalkMode::Locate)
            .and_then(|index| self.slots[index].as_ref())
    }

    /// Returns the first element in sort order.
    pub fn first(&self) -> Option<&T> {
        self.slots.iter().find_map(Option::as_ref)
    }

    /// Returns the last element in sort order.
    pub fn last(&self) -> Option<&T> {
        self.slots.iter().rev().find_map(Option::as_ref)
    }
}

//! INSERT operations for GapTree.
//!
//! An insert first tries to reuse an empty slot at or next to the walker's
//! index (soft insert). Only when no nearby gap exists is a new slot pair
//! spliced into the array (hard insert).

use crate::error::{GapTreeError, ModifyResult};
use crate::types::RawGapTree;

impl<T> RawGapTree<T> {
    /// Insert an element, keeping the slots sorted. Equal elements already
    /// present stay in front of the new one.
    pub fn insert(&mut self, item: T) {
        let index = self.insert_index(&item);

        let hard = if self.is_gap(index) {
            self.slots[index] = Some(item);
            false
        } else if index > 0 && self.is_gap(index - 1) {
            self.slots[index - 1] = Some(item);
            false
        } else if self.is_gap(index + 2) {
            // Slot `index` is occupied: push it and its neighbour one step right.
            self.slots[index + 2] = self.slots[index + 1].take();
            self.slots[index + 1] = self.slots[index].take();
            self.slots[index] = Some(item);
            false
        } else if self.is_gap(index + 1) {
            self.slots[index + 1] = self.slots[index].take();
            self.slots[index] = Some(item);
            false
        } else {
            let pair = if index % 2 == 0 {
                [Some(item), None]
            } else {
                [None, Some(item)]
            };
            self.slots.splice(index..index, pair);
            tracing::trace!(index, slots = self.slots.len(), "hard insert");
            true
        };

        if hard {
            self.metrics.record_hard_inserts();
        } else {
            self.metrics.record_soft_inserts();
        }
        self.metrics.record_insert_index(index);
        self.count += 1;

        if hard {
            self.try_rebalance();
        }
    }

    /// Insert an element that may be absent.
    ///
    /// Returns `NullElement` for `None` and leaves the tree untouched.
    pub fn try_insert(&mut self, item: Option<T>) -> ModifyResult<()> {
        let item = item.ok_or(GapTreeError::NullElement)?;
        self.insert(item);
        Ok(())
    }

    /// Insert every element of `items`.
    pub fn insert_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.insert(item);
        }
    }
}

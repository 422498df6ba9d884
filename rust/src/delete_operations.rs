//! DELETE operations for GapTree.
//!
//! Removing the low member of a pair pulls a neighbour down into it when
//! one is available (soft remove) and otherwise splices the emptied pair
//! out (hard remove). Removing the high member leaves a gap behind and gives
//! the rebalancer a chance to compact around it.

use crate::types::RawGapTree;

impl<T> RawGapTree<T> {
    /// Remove one element `==` to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.remove_by(item, |candidate| candidate == item).is_some()
    }

    /// Remove the first element comparator-equal to `probe` for which
    /// `matches` holds, returning it.
    pub(crate) fn remove_by<F>(&mut self, probe: &T, matches: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let index = self.locate_by(probe, matches)?;
        self.remove_at(index)
    }

    /// Take the element out of slot `index` and restore the pair layout.
    fn remove_at(&mut self, index: usize) -> Option<T> {
        let removed = self.slots[index].take()?;
        self.count -= 1;

        if index % 2 == 0 {
            if self.is_occupied(index + 1) {
                self.slots[index] = self.slots[index + 1].take();
                self.metrics.record_soft_removes();
            } else if self.is_occupied(index + 2) && self.is_occupied(index + 3) {
                self.slots[index] = self.slots[index + 2].take();
                self.slots[index + 2] = self.slots[index + 3].take();
                self.metrics.record_soft_removes();
            } else {
                self.slots.drain(index..index + 2);
                self.metrics.record_hard_removes();
                tracing::trace!(index, slots = self.slots.len(), "hard remove");
            }
        } else {
            self.metrics.record_soft_removes();
            if !self.try_rebalance().performed() {
                self.local_rebalance(index, self.local_strategy, false);
            }
        }

        Some(removed)
    }
}

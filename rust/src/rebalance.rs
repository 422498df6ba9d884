//! Local and global compaction.
//!
//! A local rebalance looks at a fixed window of slot pairs around an index
//! and compacts it only when every pair in the window is exactly
//! `(element, gap)`. Any other pattern is left alone until a later pass.
//! A global rebalance sweeps the whole array with the global window once
//! the slots-to-elements ratio reaches the configured threshold.

use crate::types::{RawGapTree, RebalanceOutcome, RebalanceStrategy, GLOBAL_REBALANCE_MIN_COUNT};

impl<T> RawGapTree<T> {
    /// Run a global sweep if the tree is large and sparse enough.
    pub fn try_rebalance(&mut self) -> RebalanceOutcome {
        if self.count <= GLOBAL_REBALANCE_MIN_COUNT || self.fill_ratio() < self.rebalance_threshold {
            return RebalanceOutcome::NotPerformed;
        }
        self.rebalance()
    }

    /// Sweep the array from the end towards the front, attempting a local
    /// compaction with the global window at every even index.
    pub fn rebalance(&mut self) -> RebalanceOutcome {
        let slots_before = self.slots.len();
        let strategy = self.global_strategy;
        let mut changed = false;

        let mut index = self.slots.len();
        while index >= 2 {
            index -= 2;
            changed |= self.local_rebalance(index, strategy, true);
        }

        tracing::debug!(
            changed,
            slots_before,
            slots_after = self.slots.len(),
            count = self.count,
            "global rebalance"
        );

        if changed {
            self.metrics.record_changed_rebalances();
            RebalanceOutcome::Changed
        } else {
            self.metrics.record_unchanged_rebalances();
            RebalanceOutcome::Unchanged
        }
    }

    /// Compact the window of `strategy.pairs()` slot pairs centred on
    /// `index` if it is exactly alternating `(element, gap)`.
    ///
    /// The elements move into the first half of the window and the second
    /// half is removed from the array. Windows that would cross either end
    /// of the array are skipped. A compaction outside a global sweep is
    /// counted as a hard remove and a local rebalance.
    pub(crate) fn local_rebalance(
        &mut self,
        index: usize,
        strategy: RebalanceStrategy,
        is_global: bool,
    ) -> bool {
        let pairs = strategy.pairs();
        let Some(start) = index.checked_sub(pairs) else {
            return false;
        };
        let start = start & !1;
        let end = start + strategy.slots();
        if end > self.slots.len() {
            return false;
        }

        let alternating = self.slots[start..end]
            .chunks_exact(2)
            .all(|pair| pair[0].is_some() && pair[1].is_none());
        if !alternating {
            return false;
        }

        for k in 1..pairs {
            self.slots.swap(start + k, start + 2 * k);
        }
        self.slots.drain(start + pairs..end);

        if !is_global {
            self.metrics.reclassify_soft_remove();
        }
        tracing::trace!(start, pairs, is_global, "local rebalance");
        true
    }
}

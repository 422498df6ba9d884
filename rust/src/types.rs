//! Core types and data structures for GapTree.
//!
//! This module contains the slot representation, the tuning enums, the
//! constants that gate rebalancing, and the unsynchronised core that every
//! operation module extends with its own `impl` block.

use crate::comparator::Comparator;
use crate::metrics::MetricsRecorder;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global rebalancing never runs while the tree holds this many elements or fewer.
pub const GLOBAL_REBALANCE_MIN_COUNT: usize = 1024;

/// Default ratio of physical slots to elements that triggers a global sweep.
pub const DEFAULT_REBALANCE_THRESHOLD: f64 = 1.2;

/// Smallest accepted rebalance threshold.
pub const MIN_REBALANCE_THRESHOLD: f64 = 1.0;

/// Largest accepted rebalance threshold.
pub const MAX_REBALANCE_THRESHOLD: f64 = 2.0;

// ============================================================================
// SLOTS
// ============================================================================

/// One cell of the backing array: an element, or a gap that absorbs a
/// future insert or remove without resizing.
pub type Slot<T> = Option<T>;

// ============================================================================
// ENUMS
// ============================================================================

/// Direction in which elements are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Window size, in slot pairs, examined by one local rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceStrategy {
    Four,
    Eight,
    Sixteen,
}

impl RebalanceStrategy {
    /// Number of slot pairs in the window.
    pub fn pairs(self) -> usize {
        match self {
            RebalanceStrategy::Four => 4,
            RebalanceStrategy::Eight => 8,
            RebalanceStrategy::Sixteen => 16,
        }
    }

    /// Number of slots in the window.
    pub fn slots(self) -> usize {
        self.pairs() * 2
    }
}

/// Result of a threshold-gated global rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceOutcome {
    /// The size ratio did not call for a sweep.
    NotPerformed,
    /// The sweep ran but no window matched.
    Unchanged,
    /// At least one window was compacted.
    Changed,
}

impl RebalanceOutcome {
    /// Returns true if a sweep actually walked the array.
    pub fn performed(self) -> bool {
        !matches!(self, RebalanceOutcome::NotPerformed)
    }
}

/// What the walker is asked to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkMode {
    /// A slot index at which the target may be placed without breaking order.
    InsertIndex,
    /// The slot holding an element that exactly matches the target.
    Locate,
}

// ============================================================================
// CORE DATA STRUCTURE
// ============================================================================

/// Unsynchronised gap-buffered sorted array.
///
/// Elements live in `slots` in comparator order with empty slots
/// interleaved. The slot count is always even; slots `2k` and `2k + 1` form
/// a pair. [`crate::GapTree`] wraps this in a mutex; everything here assumes
/// exclusive access.
pub struct RawGapTree<T> {
    /// The backing array.
    pub(crate) slots: Vec<Slot<T>>,
    /// Number of occupied slots.
    pub(crate) count: usize,
    /// Ordering used for every placement decision.
    pub(crate) comparator: Comparator<T>,
    /// Slots-to-elements ratio that triggers a global sweep.
    pub(crate) rebalance_threshold: f64,
    /// Window used by each step of a global sweep.
    pub(crate) global_strategy: RebalanceStrategy,
    /// Window used after a removal empties the high member of a pair.
    pub(crate) local_strategy: RebalanceStrategy,
    pub(crate) metrics: MetricsRecorder,
}

impl<T: std::fmt::Debug> std::fmt::Debug for RawGapTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawGapTree")
            .field("slots", &self.slots)
            .field("count", &self.count)
            .field("order", &self.comparator.order())
            .field("rebalance_threshold", &self.rebalance_threshold)
            .field("global_strategy", &self.global_strategy)
            .field("local_strategy", &self.local_strategy)
            .finish()
    }
}

impl<T> RawGapTree<T> {
    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no element is stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of physical slots, occupied or not.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns slots per element, or 0.0 when empty.
    pub fn fill_ratio(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.slots.len() as f64 / self.count as f64
        }
    }

    /// Removes every element and slot. Metrics are left untouched.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.count = 0;
    }

    /// Returns true if slot `index` exists and is empty.
    #[inline]
    pub(crate) fn is_gap(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    /// Returns true if slot `index` exists and holds an element.
    #[inline]
    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }
}

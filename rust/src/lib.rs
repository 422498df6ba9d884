//! Gap tree implementation in Rust: a sorted collection with gapped storage.
//!
//! Elements live in a flat array of slots grouped into pairs. Each slot is
//! either an element or a gap, and the occupied slots read front to back are
//! always in comparator order. Gaps let most inserts and removes touch only a
//! slot or two; when the array grows too sparse, local and global compaction
//! passes squeeze the gaps back out.
//!
//! [`GapTree`] is the thread-safe front door. [`KeyedGapTree`] adds an
//! exact-key index on top for O(log n) lookup and removal by key.
//!
//! ```
//! use gaptree::GapTree;
//!
//! let tree = GapTree::new();
//! tree.add_range([5, 3, 8, 1, 9, 2]);
//! assert!(tree.remove(&8));
//! assert_eq!(tree.to_vec(), vec![1, 2, 3, 5, 9]);
//! assert!(tree.validate().is_ok());
//! ```

mod alteration;
mod comparator;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod keyed;
mod metrics;
mod rebalance;
mod tree;
mod types;
mod validation;
mod walker;

#[cfg(test)]
mod proptests;

pub use comparator::Comparator;
pub use construction::{validate_threshold, Config, GapTreeBuilder};
pub use error::{GapResult, GapResultExt, GapTreeError, InitResult, ModifyResult};
pub use iteration::{IntoIter, Iter, RawIter};
pub use keyed::KeyedGapTree;
pub use metrics::Metrics;
pub use tree::GapTree;
pub use types::{
    RawGapTree, RebalanceOutcome, RebalanceStrategy, Slot, SortOrder,
    DEFAULT_REBALANCE_THRESHOLD, GLOBAL_REBALANCE_MIN_COUNT, MAX_REBALANCE_THRESHOLD,
    MIN_REBALANCE_THRESHOLD,
};

//! The lock-guarded public collection.

use parking_lot::{Mutex, MutexGuard};

use crate::comparator::Comparator;
use crate::construction::{validate_threshold, Config, GapTreeBuilder};
use crate::error::{GapResult, InitResult, ModifyResult};
use crate::metrics::Metrics;
use crate::types::{RawGapTree, RebalanceOutcome, RebalanceStrategy};

/// A sorted, duplicate-tolerant collection backed by a gap-buffered array.
///
/// Every method takes `&self` and holds one internal lock for its whole
/// duration, so a `GapTree` can be shared between threads behind an `Arc`.
/// The comparator and the `alter` transform run under that lock and must
/// not call back into the same tree.
///
/// # Examples
///
/// ```
/// use gaptree::GapTree;
///
/// let tree = GapTree::new();
/// tree.add_range([5, 3, 8, 1, 9, 2]);
/// assert_eq!(tree.to_vec(), vec![1, 2, 3, 5, 8, 9]);
///
/// assert!(tree.remove(&5));
/// assert_eq!(tree.to_vec(), vec![1, 2, 3, 8, 9]);
/// assert_eq!(tree.len(), 5);
/// ```
///
/// # Performance Characteristics
///
/// - **Lookup**: O(log n) probes
/// - **Insert/remove next to a gap**: O(log n) search plus O(1) slot moves
/// - **Insert/remove that resizes the array**: O(n)
/// - **Global rebalance**: O(n), only once the array is sparse enough
pub struct GapTree<T> {
    inner: Mutex<RawGapTree<T>>,
}

impl<T: Ord + 'static> GapTree<T> {
    /// Create an empty tree ordered by `T`'s natural ordering.
    pub fn new() -> Self {
        Self::from_raw(RawGapTree::with_defaults(Comparator::natural()))
    }

    /// Start a builder that orders elements by their natural ordering.
    pub fn builder() -> GapTreeBuilder<T> {
        GapTreeBuilder::new()
    }
}

impl<T: Ord + 'static> Default for GapTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GapTree<T> {
    /// Create an empty tree ordered by `compare`.
    pub fn with_comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        Self::from_raw(RawGapTree::with_defaults(Comparator::new(compare)))
    }

    /// Create an empty tree with an explicit comparator and configuration.
    pub fn with_config(comparator: Comparator<T>, config: &Config) -> InitResult<Self> {
        RawGapTree::new(comparator, config).map(Self::from_raw)
    }

    pub(crate) fn from_raw(raw: RawGapTree<T>) -> Self {
        Self {
            inner: Mutex::new(raw),
        }
    }

    pub(crate) fn into_raw(self) -> RawGapTree<T> {
        self.inner.into_inner()
    }

    /// Lock the tree and return the unsynchronised core.
    ///
    /// Use this to run several operations atomically, or to iterate by
    /// reference without cloning.
    pub fn lock(&self) -> MutexGuard<'_, RawGapTree<T>> {
        self.inner.lock()
    }

    // ============================================================================
    // MUTATION
    // ============================================================================

    /// Insert an element.
    pub fn add(&self, item: T) {
        self.lock().insert(item);
    }

    /// Insert an element that may be absent; `None` fails with `NullElement`.
    pub fn try_add(&self, item: Option<T>) -> ModifyResult<()> {
        self.lock().try_insert(item)
    }

    /// Insert every element of `items` under a single lock acquisition.
    pub fn add_range<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.lock().insert_all(items);
    }

    /// Remove one element `==` to `item`. Returns whether one was found.
    pub fn remove(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.lock().remove(item)
    }

    /// Replace the element `==` to `item` with `transform(element)`.
    pub fn alter<F>(&self, item: &T, transform: F) -> ModifyResult<()>
    where
        T: PartialEq,
        F: FnOnce(T) -> T,
    {
        self.lock().alter(item, transform)
    }

    /// Like [`alter`](Self::alter), reporting a missing element as `false`.
    pub fn try_alter<F>(&self, item: &T, transform: F) -> bool
    where
        T: PartialEq,
        F: FnOnce(T) -> T,
    {
        self.lock().try_alter(item, transform)
    }

    /// Remove every element.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // ============================================================================
    // QUERIES
    // ============================================================================

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.lock().contains(item)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the number of physical slots, occupied or not.
    pub fn slot_count(&self) -> usize {
        self.lock().slot_count()
    }

    /// Returns slots per element, or 0.0 when empty.
    pub fn fill_ratio(&self) -> f64 {
        self.lock().fill_ratio()
    }

    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().first().cloned()
    }

    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().last().cloned()
    }

    /// Snapshot every element in sorted order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().to_vec()
    }

    /// Snapshot at most `limit` elements from the front.
    pub fn to_vec_limited(&self, limit: usize) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().to_vec_limited(limit)
    }

    /// Copy every element into `dest` starting at `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> GapResult<usize>
    where
        T: Clone,
    {
        self.lock().copy_to(dest, offset)
    }

    /// Copy the first `count` elements into `dest` starting at `offset`.
    pub fn copy_n_to(&self, dest: &mut [T], offset: usize, count: usize) -> GapResult<usize>
    where
        T: Clone,
    {
        self.lock().copy_n_to(dest, offset, count)
    }

    // ============================================================================
    // REBALANCING AND TUNING
    // ============================================================================

    /// Run a global sweep if the tree is large and sparse enough.
    pub fn try_rebalance(&self) -> RebalanceOutcome {
        self.lock().try_rebalance()
    }

    /// Run a global sweep regardless of the threshold.
    pub fn rebalance(&self) -> RebalanceOutcome {
        self.lock().rebalance()
    }

    pub fn rebalance_threshold(&self) -> f64 {
        self.lock().rebalance_threshold
    }

    /// Change the global rebalance threshold; must lie in `[1.0, 2.0]`.
    pub fn set_rebalance_threshold(&self, threshold: f64) -> InitResult<()> {
        validate_threshold(threshold)?;
        self.lock().rebalance_threshold = threshold;
        Ok(())
    }

    pub fn global_strategy(&self) -> RebalanceStrategy {
        self.lock().global_strategy
    }

    pub fn set_global_strategy(&self, strategy: RebalanceStrategy) {
        self.lock().global_strategy = strategy;
    }

    pub fn local_strategy(&self) -> RebalanceStrategy {
        self.lock().local_strategy
    }

    pub fn set_local_strategy(&self, strategy: RebalanceStrategy) {
        self.lock().local_strategy = strategy;
    }

    // ============================================================================
    // METRICS AND VALIDATION
    // ============================================================================

    /// Snapshot of the operation counters.
    pub fn metrics(&self) -> Metrics {
        self.lock().metrics.snapshot()
    }

    pub fn metrics_enabled(&self) -> bool {
        self.lock().metrics.is_enabled()
    }

    /// Switch counting on or off. Either way every counter is reset.
    pub fn set_metrics_enabled(&self, enabled: bool) {
        self.lock().metrics.set_enabled(enabled);
    }

    /// Check ordering, element count and slot layout.
    pub fn validate(&self) -> Result<(), String> {
        self.lock().validate()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for GapTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GapTree").field("inner", &*self.lock()).finish()
    }
}

impl<T> Extend<T> for GapTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.get_mut().insert_all(iter);
    }
}

impl<T: Ord + 'static> FromIterator<T> for GapTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let tree = Self::new();
        tree.add_range(iter);
        tree
    }
}

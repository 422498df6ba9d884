//! Construction and configuration for GapTree.
//!
//! This module contains the tunable [`Config`], the fluent
//! [`GapTreeBuilder`], threshold validation, and the constructors of the
//! unsynchronised core.

use crate::comparator::Comparator;
use crate::error::{GapTreeError, GapResult, InitResult};
use crate::keyed::KeyedGapTree;
use crate::metrics::MetricsRecorder;
use crate::tree::GapTree;
use crate::types::{
    RawGapTree, RebalanceStrategy, SortOrder, DEFAULT_REBALANCE_THRESHOLD,
    MAX_REBALANCE_THRESHOLD, MIN_REBALANCE_THRESHOLD,
};

/// Tunable parameters of a gap tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Direction applied on top of the comparator.
    pub order: SortOrder,
    /// Slots-to-elements ratio at which a global sweep runs. Must lie in `[1.0, 2.0]`.
    pub rebalance_threshold: f64,
    /// Window used by each step of a global sweep.
    pub global_strategy: RebalanceStrategy,
    /// Window used after a removal empties the high member of a pair.
    pub local_strategy: RebalanceStrategy,
    /// Number of slots to reserve up front.
    pub initial_capacity: usize,
    /// Whether operation counters start enabled.
    pub metrics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: SortOrder::Ascending,
            rebalance_threshold: DEFAULT_REBALANCE_THRESHOLD,
            global_strategy: RebalanceStrategy::Four,
            local_strategy: RebalanceStrategy::Sixteen,
            initial_capacity: 0,
            metrics_enabled: false,
        }
    }
}

impl Config {
    /// Check every parameter against its valid range.
    pub fn validate(&self) -> GapResult<()> {
        validate_threshold(self.rebalance_threshold)
    }
}

/// Validate that a rebalance threshold lies in `[1.0, 2.0]`.
pub fn validate_threshold(threshold: f64) -> GapResult<()> {
    if (MIN_REBALANCE_THRESHOLD..=MAX_REBALANCE_THRESHOLD).contains(&threshold) {
        Ok(())
    } else {
        Err(GapTreeError::invalid_threshold(
            threshold,
            MIN_REBALANCE_THRESHOLD,
            MAX_REBALANCE_THRESHOLD,
        ))
    }
}

/// Fluent construction of [`GapTree`] and [`KeyedGapTree`].
///
/// # Examples
///
/// ```
/// use gaptree::{GapTreeBuilder, RebalanceStrategy, SortOrder};
///
/// let tree = GapTreeBuilder::<u32>::new()
///     .order(SortOrder::Descending)
///     .rebalance_threshold(1.5)
///     .local_strategy(RebalanceStrategy::Eight)
///     .build()
///     .unwrap();
/// tree.add_range([1, 3, 2]);
/// assert_eq!(tree.to_vec(), vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct GapTreeBuilder<T> {
    comparator: Comparator<T>,
    config: Config,
    capacity_error: Option<GapTreeError>,
}

impl<T: Ord + 'static> GapTreeBuilder<T> {
    /// Start a builder that orders elements by their natural ordering.
    pub fn new() -> Self {
        Self::with_comparator(|a: &T, b: &T| a.cmp(b))
    }
}

impl<T: Ord + 'static> Default for GapTreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GapTreeBuilder<T> {
    /// Start a builder with a caller-supplied total order.
    pub fn with_comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        Self {
            comparator: Comparator::new(compare),
            config: Config::default(),
            capacity_error: None,
        }
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.config.order = order;
        self
    }

    pub fn rebalance_threshold(mut self, threshold: f64) -> Self {
        self.config.rebalance_threshold = threshold;
        self
    }

    pub fn global_strategy(mut self, strategy: RebalanceStrategy) -> Self {
        self.config.global_strategy = strategy;
        self
    }

    pub fn local_strategy(mut self, strategy: RebalanceStrategy) -> Self {
        self.config.local_strategy = strategy;
        self
    }

    /// Reserve room for `slots` physical slots. Zero is rejected at build time.
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity_error = (slots == 0).then(|| GapTreeError::non_positive("capacity", slots));
        self.config.initial_capacity = slots;
        self
    }

    pub fn metrics(mut self, enabled: bool) -> Self {
        self.config.metrics_enabled = enabled;
        self
    }

    /// Replace every tunable at once.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    fn into_raw(self) -> InitResult<RawGapTree<T>> {
        if let Some(err) = self.capacity_error {
            return Err(err);
        }
        RawGapTree::new(self.comparator, &self.config)
    }

    /// Build a lock-guarded tree.
    pub fn build(self) -> InitResult<GapTree<T>> {
        self.into_raw().map(GapTree::from_raw)
    }

    /// Build a keyed tree that indexes each element under `key_fn(element)`.
    pub fn build_keyed<K, F>(self, key_fn: F) -> InitResult<KeyedGapTree<K, T>>
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.into_raw()
            .map(|raw| KeyedGapTree::from_raw(raw, Box::new(key_fn)))
    }
}

impl<T> RawGapTree<T> {
    /// Create an empty core with the given ordering and configuration.
    pub fn new(comparator: Comparator<T>, config: &Config) -> InitResult<Self> {
        config.validate()?;
        Ok(Self {
            slots: Vec::with_capacity(config.initial_capacity),
            count: 0,
            comparator: comparator.with_order(config.order),
            rebalance_threshold: config.rebalance_threshold,
            global_strategy: config.global_strategy,
            local_strategy: config.local_strategy,
            metrics: MetricsRecorder::new(config.metrics_enabled),
        })
    }

    /// Create an empty core with the default configuration.
    pub(crate) fn with_defaults(comparator: Comparator<T>) -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
            comparator,
            rebalance_threshold: DEFAULT_REBALANCE_THRESHOLD,
            global_strategy: RebalanceStrategy::Four,
            local_strategy: RebalanceStrategy::Sixteen,
            metrics: MetricsRecorder::new(false),
        }
    }

    /// Build a core directly from a slot layout, with metrics enabled.
    #[cfg(test)]
    pub(crate) fn from_slots(slots: Vec<Option<T>>, comparator: Comparator<T>) -> Self {
        let mut raw = Self::with_defaults(comparator);
        raw.count = slots.iter().filter(|slot| slot.is_some()).count();
        raw.slots = slots;
        raw.metrics.set_enabled(true);
        raw
    }
}

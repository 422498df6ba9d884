//! Per-tree operation counters.
//!
//! Counting is off by default. Toggling it with
//! [`crate::GapTree::set_metrics_enabled`] resets every counter.

macro_rules! define_metrics {
    ($( $(#[$doc:meta])* $name:ident ),* $(,)?) => {
        /// Snapshot of the counters kept by one tree.
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct Metrics {
            $( $(#[$doc])* pub $name: u64, )*
            /// Running mean of the slot index chosen by each insert.
            pub average_insert_index: f64,
        }

        impl MetricsRecorder {
            paste::paste! {
                $(
                    #[inline]
                    #[allow(dead_code)]
                    pub(crate) fn [<record_ $name>](&mut self) {
                        if self.enabled {
                            self.metrics.$name += 1;
                        }
                    }
                )*
            }
        }
    };
}

define_metrics! {
    /// Inserts that reused an existing empty slot.
    soft_inserts,
    /// Inserts that spliced a new pair into the array.
    hard_inserts,
    /// Removes that left the array length unchanged.
    soft_removes,
    /// Removes that shrank the array, including those reclassified by a local rebalance.
    hard_removes,
    /// Local compactions triggered directly by a removal.
    local_rebalances,
    /// Global sweeps that compacted at least one window.
    changed_rebalances,
    /// Global sweeps that found nothing to compact.
    unchanged_rebalances,
}

impl Metrics {
    /// Total number of inserts counted.
    pub fn inserts(&self) -> u64 {
        self.soft_inserts + self.hard_inserts
    }

    /// Total number of removes counted.
    pub fn removes(&self) -> u64 {
        self.soft_removes + self.hard_removes
    }

    /// Total number of global sweeps that walked the array.
    pub fn global_rebalances(&self) -> u64 {
        self.changed_rebalances + self.unchanged_rebalances
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsRecorder {
    enabled: bool,
    metrics: Metrics,
}

impl MetricsRecorder {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            metrics: Metrics::default(),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch counting on or off, discarding everything counted so far.
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.metrics = Metrics::default();
    }

    pub(crate) fn snapshot(&self) -> Metrics {
        self.metrics
    }

    /// Fold the chosen slot index into the running mean. Call after the
    /// soft/hard counter for this insert has been bumped.
    pub(crate) fn record_insert_index(&mut self, index: usize) {
        if !self.enabled {
            return;
        }
        let n = self.metrics.inserts().max(1) as f64;
        let avg = self.metrics.average_insert_index;
        self.metrics.average_insert_index = avg + (index as f64 - avg) / n;
    }

    /// A soft remove turned out to trigger a local compaction; count it as
    /// a hard remove instead.
    pub(crate) fn reclassify_soft_remove(&mut self) {
        if !self.enabled {
            return;
        }
        self.metrics.soft_removes = self.metrics.soft_removes.saturating_sub(1);
        self.metrics.hard_removes += 1;
        self.metrics.local_rebalances += 1;
    }
}

//! Comparator adapter.
//!
//! Wraps a caller-supplied total order (or the element's natural `Ord`)
//! together with the configured [`SortOrder`].

use std::cmp::Ordering;
use std::sync::Arc;

use crate::types::SortOrder;

type CompareFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// A shareable ordering over `T` with a direction applied on top.
pub struct Comparator<T> {
    compare: Arc<CompareFn<T>>,
    order: SortOrder,
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
            order: self.order,
        }
    }
}

impl<T> std::fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl<T> Comparator<T> {
    /// Wrap an ordering function. The function must be a total order and
    /// must not touch the collection that uses it.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
            order: SortOrder::Ascending,
        }
    }

    /// The natural ordering of `T`.
    pub fn natural() -> Self
    where
        T: Ord + 'static,
    {
        Self::new(|a: &T, b: &T| a.cmp(b))
    }

    /// Order by a key derived from each element.
    pub fn by_key<K, F>(key_fn: F) -> Self
    where
        T: 'static,
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::new(move |a: &T, b: &T| key_fn(a).cmp(&key_fn(b)))
    }

    /// Return this comparator with `order` applied.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Compare two elements under the configured direction.
    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

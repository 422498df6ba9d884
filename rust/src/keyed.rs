//! Keyed façade: a gap tree plus an exact-key index.
//!
//! Each element is stored in the gap tree, ordered by the element
//! comparator, and in a `BTreeMap` under `key_fn(element)` for O(log n)
//! point lookups. Both sides change together under one lock; if they ever
//! disagree the operation is rolled back and reported as an
//! `InvariantViolation`.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::comparator::Comparator;
use crate::construction::GapTreeBuilder;
use crate::error::{GapResult, GapResultExt, GapTreeError, ModifyResult};
use crate::metrics::Metrics;
use crate::types::RawGapTree;

type KeyFn<K, V> = Box<dyn Fn(&V) -> K + Send + Sync>;

struct KeyedInner<K, V> {
    index: BTreeMap<K, V>,
    tree: RawGapTree<V>,
}

/// A gap tree whose elements are also indexed by a unique key.
///
/// # Examples
///
/// ```
/// use gaptree::KeyedGapTree;
///
/// #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
/// struct Order { price: u32, id: u64 }
///
/// let book = KeyedGapTree::new(|o: &Order| o.id);
/// book.insert(Order { price: 101, id: 7 }).unwrap();
/// book.insert(Order { price: 99, id: 8 }).unwrap();
///
/// assert_eq!(book.get(&7).map(|o| o.price), Some(101));
/// assert_eq!(book.values().iter().map(|o| o.id).collect::<Vec<_>>(), vec![8, 7]);
/// assert!(book.insert(Order { price: 1, id: 7 }).is_err());
/// ```
pub struct KeyedGapTree<K, V> {
    inner: Mutex<KeyedInner<K, V>>,
    key_fn: KeyFn<K, V>,
}

impl<K: Ord, V: Ord + 'static> KeyedGapTree<K, V> {
    /// Create an empty keyed tree ordered by `V`'s natural ordering.
    pub fn new<F>(key_fn: F) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
    {
        Self::from_raw(
            RawGapTree::with_defaults(Comparator::natural()),
            Box::new(key_fn),
        )
    }

    /// Start a builder that orders elements by their natural ordering.
    pub fn builder() -> GapTreeBuilder<V> {
        GapTreeBuilder::new()
    }
}

impl<K: Ord, V> KeyedGapTree<K, V> {
    /// Create an empty keyed tree with a caller-supplied element ordering.
    pub fn with_comparator<F, C>(key_fn: F, compare: C) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
        C: Fn(&V, &V) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        Self::from_raw(
            RawGapTree::with_defaults(Comparator::new(compare)),
            Box::new(key_fn),
        )
    }

    pub(crate) fn from_raw(tree: RawGapTree<V>, key_fn: KeyFn<K, V>) -> Self {
        Self {
            inner: Mutex::new(KeyedInner {
                index: BTreeMap::new(),
                tree,
            }),
            key_fn,
        }
    }

    /// Insert `value` under `key_fn(value)`.
    ///
    /// Fails with `DuplicateKey` if that key is already indexed; the tree is
    /// left untouched in that case.
    pub fn insert(&self, value: V) -> ModifyResult<()>
    where
        K: std::fmt::Debug,
        V: Clone,
    {
        let key = (self.key_fn)(&value);
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if inner.index.contains_key(&key) {
            return Err(GapTreeError::duplicate_key(&key));
        }
        inner.index.insert(key, value.clone());
        inner.tree.insert(value);
        Ok(())
    }

    /// Remove the element indexed under `key_fn(value)`.
    pub fn remove(&self, value: &V) -> ModifyResult<bool> {
        let key = (self.key_fn)(value);
        self.remove_key(&key).map(|removed| removed.is_some())
    }

    /// Remove and return the element indexed under `key`.
    pub fn remove_key(&self, key: &K) -> ModifyResult<Option<V>> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some((owned_key, value)) = inner.index.remove_entry(key) else {
            return Ok(None);
        };

        let key_fn = &self.key_fn;
        match inner.tree.remove_by(&value, |candidate| key_fn(candidate) == *key) {
            Some(removed) => Ok(Some(removed)),
            None => {
                inner.index.insert(owned_key, value);
                tracing::error!("keyed index holds an element the tree does not");
                Err(GapTreeError::invariant_violation(
                    "remove_key",
                    "element present in index but missing from tree",
                ))
            }
        }
    }

    /// Returns a clone of the element indexed under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().index.get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().index.contains_key(key)
    }

    /// All keys in key order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.lock().index.keys().cloned().collect()
    }

    /// All elements in element order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.lock().tree.to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().index.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.tree.clear();
    }

    /// Snapshot of the underlying tree's operation counters.
    pub fn metrics(&self) -> Metrics {
        self.inner.lock().tree.metrics.snapshot()
    }

    /// Switch counting on or off. Either way every counter is reset.
    pub fn set_metrics_enabled(&self, enabled: bool) {
        self.inner.lock().tree.metrics.set_enabled(enabled);
    }

    /// Check the tree invariants and that index and tree hold the same elements.
    pub fn validate(&self) -> GapResult<()>
    where
        V: PartialEq,
    {
        let inner = self.inner.lock();
        inner
            .tree
            .validate_for_operation("tree layout")
            .with_operation("validate")?;

        if inner.index.len() != inner.tree.len() {
            return Err(GapTreeError::invariant_violation(
                "validate",
                &format!(
                    "index has {} entries but tree has {} elements",
                    inner.index.len(),
                    inner.tree.len()
                ),
            ));
        }
        for element in inner.tree.iter() {
            let key = (self.key_fn)(element);
            if inner.index.get(&key) != Some(element) {
                return Err(GapTreeError::invariant_violation(
                    "validate",
                    "tree element is not indexed under its key",
                ));
            }
        }
        Ok(())
    }
}

impl<K, V> std::fmt::Debug for KeyedGapTree<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("KeyedGapTree")
            .field("index", &inner.index)
            .field("tree", &inner.tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Quote {
        price: u32,
        id: u32,
    }

    fn quote(price: u32, id: u32) -> Quote {
        Quote { price, id }
    }

    #[test]
    fn test_insert_and_get() {
        let tree = KeyedGapTree::new(|q: &Quote| q.id);
        tree.insert(quote(30, 1)).unwrap();
        tree.insert(quote(10, 2)).unwrap();
        tree.insert(quote(20, 3)).unwrap();

        assert_eq!(tree.get(&3), Some(quote(20, 3)));
        assert!(tree.contains_key(&1));
        assert!(!tree.contains_key(&4));
        assert_eq!(tree.keys(), vec![1, 2, 3]);
        assert_eq!(tree.values(), vec![quote(10, 2), quote(20, 3), quote(30, 1)]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let tree = KeyedGapTree::new(|q: &Quote| q.id);
        tree.insert(quote(30, 1)).unwrap();
        let err = tree.insert(quote(40, 1)).unwrap_err();
        assert_eq!(err, GapTreeError::DuplicateKey("1".to_string()));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.values(), vec![quote(30, 1)]);
    }

    #[test]
    fn test_remove_keeps_sides_in_step() {
        let tree = KeyedGapTree::new(|q: &Quote| q.id);
        for (price, id) in [(5, 1), (5, 2), (7, 3)] {
            tree.insert(quote(price, id)).unwrap();
        }

        assert_eq!(tree.remove_key(&2), Ok(Some(quote(5, 2))));
        assert_eq!(tree.remove_key(&2), Ok(None));
        assert_eq!(tree.remove(&quote(7, 3)), Ok(true));
        assert_eq!(tree.get(&3), None);
        assert_eq!(tree.values(), vec![quote(5, 1)]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_picks_keyed_element_among_equals() {
        // Order by price only so every element compares equal.
        let tree = KeyedGapTree::with_comparator(|q: &Quote| q.id, |a: &Quote, b: &Quote| {
            a.price.cmp(&b.price)
        });
        for id in 0..6 {
            tree.insert(quote(100, id)).unwrap();
        }
        assert_eq!(tree.remove_key(&4), Ok(Some(quote(100, 4))));
        let ids: Vec<u32> = tree.values().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_clear() {
        let tree = KeyedGapTree::new(|q: &Quote| q.id);
        tree.insert(quote(1, 1)).unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.values().is_empty());
    }

    #[test]
    fn test_built_from_builder_with_metrics() {
        let tree = KeyedGapTree::<u32, Quote>::builder()
            .metrics(true)
            .build_keyed(|q: &Quote| q.id)
            .unwrap();
        tree.insert(quote(1, 1)).unwrap();
        assert_eq!(tree.metrics().inserts(), 1);
    }
}

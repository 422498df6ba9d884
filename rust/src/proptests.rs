use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_raw(t: &RawGapTree<i32>) {
    assert_eq!(t.slot_count() % 2, 0, "slot array must hold whole pairs");
    if let Err(e) = t.validate() {
        panic!("invariant violated: {e}\nlayout: {}", t.occupancy_pattern());
    }
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Remove(i32),
    Contains(i32),
    Rebalance,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A narrow value range keeps duplicates and repeat removals common.
    let value = -64i32..64;
    let op = prop_oneof![
        6 => value.clone().prop_map(Op::Insert),
        4 => value.clone().prop_map(Op::Remove),
        2 => value.prop_map(Op::Contains),
        1 => Just(Op::Rebalance),
    ];
    prop::collection::vec(op, 0..400)
}

fn model_remove(model: &mut Vec<i32>, value: i32) -> bool {
    match model.binary_search(&value) {
        Ok(pos) => {
            model.remove(pos);
            true
        }
        Err(_) => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_sorted_vec(ops in ops_strategy()) {
        let mut t = RawGapTree::with_defaults(Comparator::natural());
        let mut m: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    t.insert(v);
                    let pos = m.partition_point(|x| *x <= v);
                    m.insert(pos, v);
                }
                Op::Remove(v) => {
                    prop_assert_eq!(t.remove(&v), model_remove(&mut m, v));
                }
                Op::Contains(v) => {
                    prop_assert_eq!(t.contains(&v), m.binary_search(&v).is_ok());
                }
                Op::Rebalance => {
                    t.rebalance();
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_raw(&t);
        prop_assert_eq!(t.to_vec(), m);
    }

    #[test]
    fn prop_rebalance_preserves_contents(values in prop::collection::vec(any::<i32>(), 0..300), drop_every in 2usize..5) {
        let mut t = RawGapTree::with_defaults(Comparator::natural());
        t.insert_all(values.iter().copied());
        for (i, v) in values.iter().enumerate() {
            if i % drop_every == 0 {
                t.remove(v);
            }
        }
        let before = t.to_vec();
        let slots_before = t.slot_count();

        let outcome = t.rebalance();

        validate_raw(&t);
        prop_assert_eq!(t.to_vec(), before);
        prop_assert!(t.slot_count() <= slots_before);
        prop_assert_eq!(outcome == RebalanceOutcome::Changed, t.slot_count() < slots_before);
    }

    #[test]
    fn prop_descending_reverses(values in prop::collection::vec(any::<i16>(), 0..200)) {
        let tree = GapTreeBuilder::new()
            .order(SortOrder::Descending)
            .build()
            .unwrap();
        tree.add_range(values.iter().copied());

        let mut expected = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(tree.to_vec(), expected);
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn prop_keyed_index_agrees(ops in prop::collection::vec((any::<bool>(), 0u16..48, -8i8..8), 0..300)) {
        let t = KeyedGapTree::new(|v: &(i8, u16)| v.1);
        let mut m: BTreeMap<u16, (i8, u16)> = BTreeMap::new();

        for (insert, id, priority) in ops {
            if insert {
                let got = t.insert((priority, id));
                if m.contains_key(&id) {
                    prop_assert!(got.is_err());
                } else {
                    prop_assert!(got.is_ok());
                    m.insert(id, (priority, id));
                }
            } else {
                prop_assert_eq!(t.remove_key(&id).unwrap(), m.remove(&id));
            }
            prop_assert_eq!(t.len(), m.len());
        }

        prop_assert!(t.validate().is_ok());
        let mut expected: Vec<(i8, u16)> = m.values().copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(t.values(), expected);
        prop_assert_eq!(t.keys(), m.keys().copied().collect::<Vec<_>>());
    }
}

#[test]
fn every_removal_order_of_small_set() {
    fn permutations(items: &[i32]) -> Vec<Vec<i32>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    let base = [1, 2, 3, 4, 5, 6];
    for order in permutations(&base) {
        let mut t = RawGapTree::with_defaults(Comparator::natural());
        t.insert_all(base.iter().copied());
        let mut remaining = base.to_vec();
        for v in &order {
            assert!(t.remove(v), "failed to remove {v} in order {order:?}");
            remaining.retain(|x| x != v);
            validate_raw(&t);
            assert_eq!(t.to_vec(), remaining);
        }
        assert!(t.is_empty());
    }
}

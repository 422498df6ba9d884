use gaptree::{GapTreeBuilder, GapTreeError, KeyedGapTree, SortOrder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
struct Session {
    user: String,
    last_seen: u64,
}

fn session(user: &str, last_seen: u64) -> Session {
    Session {
        user: user.to_string(),
        last_seen,
    }
}

fn by_recency() -> KeyedGapTree<String, Session> {
    GapTreeBuilder::with_comparator(|a: &Session, b: &Session| a.last_seen.cmp(&b.last_seen))
        .order(SortOrder::Descending)
        .build_keyed(|s: &Session| s.user.clone())
        .unwrap()
}

#[test]
fn test_get_follows_insert_and_remove() {
    let sessions = by_recency();
    let alice = session("alice", 100);
    sessions.insert(alice.clone()).unwrap();
    assert_eq!(sessions.get(&"alice".to_string()), Some(alice.clone()));

    assert_eq!(sessions.remove(&alice), Ok(true));
    assert_eq!(sessions.get(&"alice".to_string()), None);
    assert!(!sessions.contains_key(&"alice".to_string()));
    assert_eq!(sessions.remove(&alice), Ok(false));
}

#[test]
fn test_values_follow_comparator_keys_follow_key_order() {
    let sessions = by_recency();
    sessions.insert(session("carol", 5)).unwrap();
    sessions.insert(session("alice", 9)).unwrap();
    sessions.insert(session("bob", 5)).unwrap();

    assert_eq!(sessions.keys(), vec!["alice", "bob", "carol"]);
    let users: Vec<String> = sessions.values().into_iter().map(|s| s.user).collect();
    assert_eq!(users, vec!["alice", "carol", "bob"]);
    assert!(sessions.validate().is_ok());
}

#[test]
fn test_duplicate_key_leaves_both_sides_untouched() {
    let sessions = by_recency();
    sessions.insert(session("dave", 1)).unwrap();

    let err = sessions.insert(session("dave", 2)).unwrap_err();
    assert_eq!(err, GapTreeError::DuplicateKey("\"dave\"".to_string()));
    assert!(!err.is_fatal());
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions.values(), vec![session("dave", 1)]);
    assert!(sessions.validate().is_ok());
}

#[test]
fn test_refresh_by_remove_key_then_insert() {
    let sessions = by_recency();
    for (i, user) in ["a", "b", "c", "d"].iter().enumerate() {
        sessions.insert(session(user, i as u64)).unwrap();
    }

    let stale = sessions.remove_key(&"b".to_string()).unwrap().unwrap();
    sessions
        .insert(Session {
            last_seen: 10,
            ..stale
        })
        .unwrap();

    let users: Vec<String> = sessions.values().into_iter().map(|s| s.user).collect();
    assert_eq!(users, vec!["b", "d", "c", "a"]);
}

#[test]
fn test_random_operations_against_btreemap() {
    let mut rng = StdRng::seed_from_u64(2024);
    let tree = KeyedGapTree::new(|v: &(u32, u32)| v.1);
    let mut model: BTreeMap<u32, (u32, u32)> = BTreeMap::new();

    for _ in 0..10_000 {
        let id = rng.gen_range(0..1500);
        if rng.gen_bool(0.6) {
            let value = (rng.gen_range(0..50), id);
            match tree.insert(value) {
                Ok(()) => assert!(model.insert(id, value).is_none()),
                Err(GapTreeError::DuplicateKey(_)) => assert!(model.contains_key(&id)),
                Err(other) => panic!("unexpected error {}", other),
            }
        } else {
            assert_eq!(tree.remove_key(&id).unwrap(), model.remove(&id));
        }
    }

    assert_eq!(tree.len(), model.len());
    assert!(tree.validate().is_ok());
    for (id, value) in &model {
        assert_eq!(tree.get(id), Some(*value));
    }
    let mut expected: Vec<(u32, u32)> = model.into_values().collect();
    expected.sort_unstable();
    assert_eq!(tree.values(), expected);
}

use super::{Direction, Llrb, Neighbors};

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;
use std::ops::Bound;

fn validate_tree<V>(t: &Llrb<u8, V>, m: &BTreeMap<u8, V>) {
    let stats = t.validate().unwrap_or_else(|e| panic!("invalid tree: {}", e));
    assert_eq!(stats.entries, m.len(), "entry count must match the model");
    if !m.is_empty() {
        assert!(
            stats.max_depth <= 2 * stats.black_height,
            "depth {} exceeds twice the black height {}",
            stats.max_depth,
            stats.black_height
        );
    }
}

// Narrow keys so that duplicates, hits and misses are all common.
#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 4)]
    Insert(u8, u16),
    TryInsert(u8, u16),
    #[proptest(weight = 2)]
    Upsert(u8, u16),
    #[proptest(weight = 3)]
    Remove(u8),
    PopFirst,
    PopLast,
    Get(u8),
    Nearest(u8),
    Siblings(u8),
    Range(u8, u8, bool),
}

fn expected_nearest(m: &BTreeMap<u8, u16>, k: u8) -> (Option<(u8, u16)>, Option<(u8, u16)>) {
    (
        m.range(..=k).next_back().map(|(k, v)| (*k, *v)),
        m.range(k..).next().map(|(k, v)| (*k, *v)),
    )
}

fn expected_siblings(m: &BTreeMap<u8, u16>, k: u8) -> (Option<(u8, u16)>, Option<(u8, u16)>) {
    (
        m.range(..k).next_back().map(|(k, v)| (*k, *v)),
        m.range((Bound::Excluded(k), Bound::Unbounded))
            .next()
            .map(|(k, v)| (*k, *v)),
    )
}

fn owned(n: Neighbors<(&u8, &u16)>) -> (Option<(u8, u16)>, Option<(u8, u16)>) {
    n.map(|(k, v)| (*k, *v)).into_tuple()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=2000)) {
        let mut t: Llrb<u8, u16> = Llrb::new();
        let mut m: BTreeMap<u8, u16> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = !m.contains_key(&key);
                    prop_assert_eq!(t.insert(key, value).is_ok(), fresh);
                    if fresh {
                        m.insert(key, value);
                    }
                }
                Op::TryInsert(key, value) => {
                    let existing = m.get(&key).copied();
                    let got = t.try_insert(key, value).map(|(k, v)| (*k, *v));
                    prop_assert_eq!(got, existing.map(|v| (key, v)));
                    m.entry(key).or_insert(value);
                }
                Op::Upsert(key, value) => {
                    prop_assert_eq!(t.upsert(key, value), m.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                }
                Op::PopFirst => {
                    prop_assert_eq!(t.pop_first(), m.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(t.pop_last(), m.pop_last());
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                }
                Op::Nearest(key) => {
                    prop_assert_eq!(owned(t.nearest(&key)), expected_nearest(&m, key));
                }
                Op::Siblings(key) => {
                    prop_assert_eq!(owned(t.siblings(&key)), expected_siblings(&m, key));
                }
                Op::Range(a, b, backward) => {
                    let (lo, hi) = (a.min(b), a.max(b));
                    let direction = if backward { Direction::Backward } else { Direction::Forward };
                    let got: Vec<u8> = t
                        .range(Bound::Included(&lo), Bound::Excluded(&hi), direction)
                        .map(|(k, _)| *k)
                        .collect();
                    let mut expected: Vec<u8> = m.range(lo..hi).map(|(k, _)| *k).collect();
                    if backward {
                        expected.reverse();
                    }
                    prop_assert_eq!(got, expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t, &m);
        let got: Vec<(u8, u16)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u8, u16)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_every_step_is_balanced(ops in prop::collection::vec(any::<Op>(), 0..=300)) {
        let mut t: Llrb<u8, u16> = Llrb::new();
        let mut m: BTreeMap<u8, u16> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) | Op::TryInsert(key, value) => {
                    t.try_insert(key, value);
                    m.entry(key).or_insert(value);
                }
                Op::Upsert(key, value) => {
                    t.upsert(key, value);
                    m.insert(key, value);
                }
                Op::Remove(key) => {
                    t.remove(&key);
                    m.remove(&key);
                }
                Op::PopFirst => {
                    t.pop_first();
                    m.pop_first();
                }
                Op::PopLast => {
                    t.pop_last();
                    m.pop_last();
                }
                Op::Get(_) | Op::Nearest(_) | Op::Siblings(_) | Op::Range(..) => continue,
            }
            validate_tree(&t, &m);
        }
    }

    #[test]
    fn prop_round_trip_leaves_empty_tree(
        keys in Just((0u16..512).collect::<Vec<_>>()).prop_shuffle(),
        order in Just((0u16..512).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let mut t: Llrb<u16, ()> = Llrb::new();
        for k in keys {
            prop_assert!(t.insert(k, ()).is_ok());
        }
        prop_assert_eq!(t.len(), 512);

        for (i, k) in order.into_iter().enumerate() {
            prop_assert_eq!(t.remove(&k), Some(()));
            prop_assert_eq!(t.len(), 511 - i);
        }
        prop_assert!(t.is_empty());
        prop_assert!(t.root_is_empty());
        prop_assert!(t.validate().is_ok());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7];

    for_each_permutation(&keys, |perm| {
        let mut t: Llrb<u8, u8> = Llrb::new();
        let mut m: BTreeMap<u8, u8> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u8;
            assert!(t.insert(k, v).is_ok());
            m.insert(k, v);
            validate_tree(&t, &m);
        }

        let got: Vec<(u8, u8)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u8, u8)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7];

    // Insert in a fixed order, then remove in all permutations.
    let mut base_tree: Llrb<u8, u8> = Llrb::new();
    let mut base_map: BTreeMap<u8, u8> = BTreeMap::new();
    for (i, &k) in keys.iter().enumerate() {
        let v = i as u8;
        assert!(base_tree.insert(k, v).is_ok());
        base_map.insert(k, v);
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base_tree.clone();
        let mut m = base_map.clone();

        for k in perm {
            assert_eq!(t.remove(&k), m.remove(&k));
            assert_eq!(t.len(), m.len());
            validate_tree(&t, &m);
        }
        assert_eq!(t.len(), 0);
        assert!(t.root_is_empty());
    });
}

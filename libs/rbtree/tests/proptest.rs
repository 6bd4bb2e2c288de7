// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![feature(allocator_api)]

mod common;

use std::collections::BTreeSet;

use common::max_height;
use proptest::prelude::*;
use rbtree::{Identity, RbTree};

#[derive(Debug, Clone)]
enum Op {
    Insert(u16),
    Remove(u16),
    RemoveAtCursor(u16),
    PopMin,
    PopMax,
    RetainMultiplesOf(u16),
}

fn op() -> impl Strategy<Value = Op> {
    // a small key space makes duplicates and hits on removal likely
    prop_oneof![
        6 => (0u16..512).prop_map(Op::Insert),
        4 => (0u16..512).prop_map(Op::Remove),
        2 => (0u16..512).prop_map(Op::RemoveAtCursor),
        1 => Just(Op::PopMin),
        1 => Just(Op::PopMax),
        1 => (2u16..8).prop_map(Op::RetainMultiplesOf),
    ]
}

fn assert_matches(tree: &RbTree<u16, Identity>, model: &BTreeSet<u16>) {
    tree.assert_valid();
    assert_eq!(tree.len(), model.len());
    assert!(tree.iter().eq(model.iter()));
    assert!(tree.iter().rev().eq(model.iter().rev()));
    assert!(tree.height() <= max_height(tree.len()));
}

proptest! {
    #[test]
    fn random_operations(ops in proptest::collection::vec(op(), 1..400)) {
        let mut tree: RbTree<u16, Identity> = RbTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let (cursor, inserted) = tree.insert(key);
                    prop_assert_eq!(cursor.get(), Some(&key));
                    prop_assert_eq!(inserted, model.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key).is_some(), model.remove(&key));
                    prop_assert_eq!(tree.erase(&key), 0);
                }
                Op::RemoveAtCursor(key) => {
                    let expected_next = model.range(key..).nth(1).copied();
                    let mut cursor = tree.lower_bound_mut(&key);
                    match cursor.remove_current() {
                        Some(removed) => {
                            prop_assert!(model.remove(&removed));
                            prop_assert!(removed >= key);
                            prop_assert_eq!(cursor.get().copied(), expected_next);
                        }
                        None => {
                            prop_assert!(model.range(key..).next().is_none());
                        }
                    }
                }
                Op::PopMin => {
                    prop_assert_eq!(tree.pop_first(), model.pop_first());
                }
                Op::PopMax => {
                    prop_assert_eq!(tree.pop_last(), model.pop_last());
                }
                Op::RetainMultiplesOf(n) => {
                    tree.retain(|key| *key % n == 0);
                    model.retain(|key| *key % n == 0);
                }
            }

            assert_matches(&tree, &model);
        }

        for key in 0u16..512 {
            prop_assert_eq!(tree.contains(&key), model.contains(&key));
            prop_assert_eq!(
                tree.lower_bound(&key).get(),
                model.range(key..).next()
            );
        }
    }

    #[test]
    fn insert_all_then_remove_some(
        keys in proptest::collection::btree_set(any::<u32>(), 0..300),
        remove_every in 1usize..5,
    ) {
        let mut tree: RbTree<u32, Identity> = keys.iter().copied().collect();
        tree.assert_valid();
        prop_assert_eq!(tree.len(), keys.len());
        for key in &keys {
            prop_assert!(tree.contains(key));
        }

        let (removed, retained): (Vec<_>, Vec<_>) = keys
            .iter()
            .copied()
            .enumerate()
            .partition(|(i, _)| i % remove_every == 0);

        for (_, key) in &removed {
            prop_assert_eq!(tree.erase(key), 1);
        }
        tree.assert_valid();

        for (_, key) in &removed {
            prop_assert!(!tree.contains(key));
        }
        for (_, key) in &retained {
            prop_assert!(tree.contains(key));
        }
        prop_assert_eq!(tree.len(), retained.len());
        prop_assert_eq!(tree.iter().count(), tree.len());
    }

    #[test]
    fn clone_matches_shape(keys in proptest::collection::vec(any::<u16>(), 0..200)) {
        let tree: RbTree<u16, Identity> = keys.into_iter().collect();
        let copy = tree.clone();
        copy.assert_valid();
        prop_assert_eq!(copy.height(), tree.height());
        prop_assert!(copy.iter().eq(tree.iter()));
    }

    #[test]
    fn erase_range_keeps_invariants(
        keys in proptest::collection::vec(any::<u16>(), 0..300),
        lo in any::<u16>(),
        len in 0u16..2048,
    ) {
        let mut tree: RbTree<u16, Identity> = keys.iter().copied().collect();
        let mut model: BTreeSet<u16> = keys.into_iter().collect();
        let hi = lo.saturating_add(len);

        let removed = tree.erase_range(lo..hi);
        let before = model.len();
        model.retain(|k| !(lo..hi).contains(k));

        prop_assert_eq!(removed, before - model.len());
        assert_matches(&tree, &model);
    }
}

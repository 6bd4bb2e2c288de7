// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use containers::{Greater, Set};
use rand::seq::SliceRandom;

#[test]
fn shuffled_inserts_come_out_sorted() {
    let mut keys: Vec<u32> = (0..1000).collect();
    keys.shuffle(&mut rand::rng());

    let mut set = Set::new();
    for key in &keys {
        assert!(set.insert(*key));
    }
    assert!(!set.insert(keys[0]));
    assert_eq!(set.len(), 1000);
    assert!(set.iter().copied().eq(0..1000));
    assert!(set.iter().rev().copied().eq((0..1000).rev()));
    assert_eq!(set.first(), Some(&0));
    assert_eq!(set.last(), Some(&999));
}

#[test]
fn membership_and_removal() {
    let mut set: Set<u32> = [10, 20, 30, 15, 25, 5].into_iter().collect();
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [5, 10, 15, 20, 25, 30]);

    assert!(set.remove(&20));
    assert!(!set.remove(&20));
    assert_eq!(set.erase(&20), 0);
    assert_eq!(set.len(), 5);
    assert!(!set.contains(&20));
    assert_eq!(set.count(&25), 1);
    assert_eq!(set.get(&25), Some(&25));
    assert_eq!(set.take(&25), Some(25));
    assert_eq!(set.take(&25), None);

    assert_eq!(set.pop_first(), Some(5));
    assert_eq!(set.pop_last(), Some(30));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [10, 15]);
}

#[test]
fn bounds() {
    let set: Set<u32> = (0..10).map(|i| i * 10).collect();
    assert_eq!(set.lower_bound(&35).get(), Some(&40));
    assert_eq!(set.lower_bound(&40).get(), Some(&40));
    assert_eq!(set.upper_bound(&40).get(), Some(&50));
    assert!(set.lower_bound(&91).is_end());

    let (lo, hi) = set.equal_range(&70);
    assert_eq!(lo.get(), Some(&70));
    assert_eq!(lo.peek_next(), hi.get());

    let mut cursor = set.lower_bound(&0);
    assert_eq!(cursor.peek_prev(), None);
    cursor.move_prev();
    assert!(cursor.is_end());
    cursor.move_prev();
    assert_eq!(cursor.get(), Some(&90));
}

#[test]
fn retain_extend_and_debug() {
    let mut set: Set<u8> = Set::new();
    set.extend(&[3, 1, 2]);
    set.extend([6, 5, 4]);
    set.retain(|v| v % 2 == 1);
    assert_eq!(format!("{set:?}"), "{1, 3, 5}");
    assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3, 5]);
}

#[test]
fn custom_orderings() {
    let mut set = Set::with_comparator(Greater);
    set.extend(["b", "c", "a"]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["c", "b", "a"]);

    let by_len = |a: &&str, b: &&str| a.len() < b.len();
    let mut set = Set::with_comparator(by_len);
    assert!(set.insert("ccc"));
    assert!(set.insert("a"));
    assert!(!set.insert("b"));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["a", "ccc"]);
}

#[test]
fn clone_and_compare() {
    let a: Set<u32> = (0..5).collect();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.remove(&4);
    assert!(b < a);
    let c = a.try_clone().unwrap();
    assert_eq!(a.cmp(&c), std::cmp::Ordering::Equal);

    let mut d: Set<u32> = Set::default();
    d.swap(&mut b);
    assert!(b.is_empty());
    assert_eq!(d.len(), 4);
}

#[test]
fn erase_range() {
    let mut set: Set<u32> = (0..20).collect();
    assert_eq!(set.erase_range(5..10), 5);
    assert_eq!(set.erase_range(5..10), 0);
    assert_eq!(set.erase_range(15..), 5);
    assert_eq!(set.erase_range(3..=3), 1);
    assert_eq!(set.erase_range(12..11), 0);
    assert_eq!(
        set.iter().copied().collect::<Vec<_>>(),
        [0, 1, 2, 4, 10, 11, 12, 13, 14]
    );
}

// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![feature(allocator_api)]

use std::alloc::{AllocError, Allocator, Layout};
use std::ptr::NonNull;

use containers::{Error, Greater, Map};

/// An allocator that never hands out memory.
#[derive(Debug, Clone, Copy, Default)]
struct Refuse;

unsafe impl Allocator for Refuse {
    fn allocate(&self, _layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        Err(AllocError)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        unreachable!("nothing was ever allocated");
    }
}

#[test]
fn insert_does_not_overwrite() {
    let mut map = Map::new();
    assert!(map.insert(1, "one"));
    assert!(!map.insert(1, "uno"));
    assert_eq!(map.get(&1), Some(&"one"));
    assert_eq!(map.len(), 1);

    assert_eq!(map.insert_or_assign(1, "uno"), Some("one"));
    assert_eq!(map.insert_or_assign(2, "dos"), None);
    assert_eq!(map[&1], "uno");
    assert_eq!(map[&2], "dos");
}

#[test]
fn checked_access() {
    let mut map: Map<u32, u32> = (0..4).map(|i| (i, i * i)).collect();
    assert_eq!(map.at(&3), Ok(&9));
    assert_eq!(map.at(&4), Err(Error::OutOfRange));
    *map.at_mut(&2).unwrap() += 1;
    assert_eq!(map.get(&2), Some(&5));
    assert_eq!(map.at_mut(&7), Err(Error::OutOfRange));
    assert_eq!(Error::OutOfRange.to_string(), "key out of range");
}

#[test]
#[should_panic = "no entry found for key"]
fn index_panics_on_missing_key() {
    let map: Map<u32, u32> = Map::new();
    let _ = map[&1];
}

#[test]
fn get_or_insert_behaves_like_subscript() {
    let mut counts: Map<&str, usize> = Map::new();
    for word in "the cat saw the other cat and the dog".split(' ') {
        *counts.get_or_insert_default(word) += 1;
    }
    assert_eq!(counts[&"the"], 3);
    assert_eq!(counts[&"cat"], 2);
    assert_eq!(counts[&"dog"], 1);
    assert_eq!(counts.count(&"bird"), 0);

    let mut built = 0;
    let value = counts.get_or_insert_with("cat", || {
        built += 1;
        100
    });
    assert_eq!(*value, 2);
    assert_eq!(built, 0);
}

#[test]
fn iteration_is_sorted_by_key() {
    let map: Map<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), ['a', 'b', 'c']);
    assert_eq!(
        map.iter().rev().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        [(3, 'c'), (2, 'b'), (1, 'a')]
    );
    assert_eq!(map.iter().len(), 3);
    assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b', 3: 'c'}");
}

#[test]
fn mutable_iteration() {
    let mut map: Map<u8, u32> = (0..5).map(|i| (i, 0)).collect();
    for (k, v) in &mut map {
        *v = u32::from(*k) * 10;
    }
    for v in map.values_mut() {
        *v += 1;
    }
    assert_eq!(
        map.into_iter().collect::<Vec<_>>(),
        [(0, 1), (1, 11), (2, 21), (3, 31), (4, 41)]
    );
}

#[test]
fn bounds_and_cursors() {
    let map: Map<u32, &str> = [(10, "a"), (20, "b"), (30, "c")].into_iter().collect();

    let lower = map.lower_bound(&15);
    assert_eq!(lower.key_value(), Some((&20, &"b")));
    assert_eq!(lower.peek_prev(), Some((&10, &"a")));

    let (lo, hi) = map.equal_range(&20);
    assert_eq!(lo.key(), Some(&20));
    assert_eq!(hi.key(), Some(&30));

    let (lo, hi) = map.equal_range(&25);
    assert_eq!(lo, hi);

    let mut end = map.upper_bound(&30);
    assert!(end.is_end());
    assert_eq!(end.value(), None);
    end.move_prev();
    assert_eq!(end.value(), Some(&"c"));
    end.move_next();
    assert!(end.is_end());
    end.move_next();
    assert_eq!(end.key(), Some(&10));
}

#[test]
fn removal() {
    let mut map: Map<u32, String> = (0..10).map(|i| (i, i.to_string())).collect();
    assert_eq!(map.remove(&3), Some("3".to_string()));
    assert_eq!(map.remove(&3), None);
    assert_eq!(map.remove_entry(&4), Some((4, "4".to_string())));
    assert_eq!(map.erase(&5), 1);
    assert_eq!(map.erase(&5), 0);
    assert_eq!(map.pop_first(), Some((0, "0".to_string())));
    assert_eq!(map.pop_last(), Some((9, "9".to_string())));
    assert_eq!(map.first_key_value(), Some((&1, &"1".to_string())));
    assert_eq!(map.last_key_value(), Some((&8, &"8".to_string())));

    map.retain(|k, v| {
        v.push('!');
        k % 2 == 0
    });
    assert_eq!(
        map.iter().map(|(_, v)| v.as_str()).collect::<Vec<_>>(),
        ["2!", "6!", "8!"]
    );

    map.clear();
    assert!(map.is_empty());
    assert!(map.insert(1, "again".to_string()));
}

#[test]
fn borrowed_string_keys() {
    let mut map: Map<String, u32> = Map::new();
    map.insert("apple".to_string(), 1);
    map.insert("pear".to_string(), 2);
    assert!(map.contains_key("apple"));
    assert_eq!(map.get_key_value("pear"), Some((&"pear".to_string(), &2)));
    assert_eq!(map.remove("apple"), Some(1));
    assert!(!map.contains_key("apple"));
}

#[test]
fn descending_order_with_greater() {
    let mut map = Map::with_comparator(Greater);
    map.extend([(1, 'a'), (3, 'c'), (2, 'b'), (3, 'z')]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
    assert_eq!(map.get(&3), Some(&'c'));

    let by_entry = map.value_comp();
    assert!(containers::Compare::less(&by_entry, &(5, 'x'), &(4, 'y')));
}

#[test]
fn clone_compare_and_swap() {
    let mut a: Map<u32, u32> = (0..3).map(|i| (i, i)).collect();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.insert_or_assign(2, 5);
    assert!(a < b);

    let mut c = a.try_clone().unwrap();
    c.insert(7, 7);
    a.swap(&mut c);
    assert_eq!(a.len(), 4);
    assert_eq!(c.len(), 3);
    assert_eq!(Map::<u32, u32>::default().len(), 0);
}

#[test]
fn allocation_failure_is_reported() {
    assert_eq!(Map::<u32, u32, _, _>::try_new_in(Refuse).err(), Some(Error::AllocError));
    assert_eq!(Error::AllocError.to_string(), "memory allocation failed");
}

#[test]
fn erase_range() {
    let mut map: Map<String, u32> = ["a", "b", "c", "d", "e"]
        .into_iter()
        .zip(0..)
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let (lo, hi) = ("b".to_string(), "d".to_string());
    assert_eq!(map.erase_range(lo..=hi), 3);
    assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["a", "e"]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [0, 4]);
}

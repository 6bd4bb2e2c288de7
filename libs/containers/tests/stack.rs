// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::VecDeque;

use containers::{BackSequence, Stack};

#[test]
fn last_in_first_out() {
    let mut stack: Stack<&str> = Stack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.top(), None);
    assert_eq!(stack.pop(), None);

    stack.push("a");
    stack.push("b");
    stack.try_push("c").unwrap();
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.top(), Some(&"c"));

    assert_eq!(stack.pop(), Some("c"));
    assert_eq!(stack.pop(), Some("b"));
    assert_eq!(stack.top(), Some(&"a"));
    assert_eq!(stack.len(), 1);
}

#[test]
fn wraps_an_existing_container() {
    let deque: VecDeque<u32> = (1..=3).collect();
    let mut stack = Stack::from_container(deque);
    assert_eq!(stack.top(), Some(&3));
    stack.push(4);
    assert_eq!(stack.as_inner().front(), Some(&1));
    assert_eq!(stack.into_inner(), [1, 2, 3, 4]);
}

#[test]
fn comparisons_follow_the_container() {
    let a: Stack<u32> = [1, 2, 3].into_iter().collect();
    let b: Stack<u32> = [1, 2, 4].into_iter().collect();
    let c: Stack<u32> = [1, 2].into_iter().collect();
    assert!(a < b);
    assert!(c < a);
    assert_eq!(a.clone(), a);
    assert_ne!(a, b);
    assert_eq!(format!("{a:?}"), "Stack([1, 2, 3])");
}

#[test]
fn back_sequence_on_vec() {
    let mut seq: Vec<u8> = Vec::new();
    assert!(BackSequence::is_empty(&seq));
    seq.try_push_back(1).unwrap();
    BackSequence::push_back(&mut seq, 2);
    *seq.back_mut().unwrap() += 10;
    assert_eq!(BackSequence::back(&seq), Some(&12));
    assert_eq!(BackSequence::len(&seq), 2);
    assert_eq!(BackSequence::pop_back(&mut seq), Some(12));
}

// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Ordered associative containers and a stack adaptor.
//!
//! [`Map`] and [`Set`] are thin façades over [`rbtree::RbTree`]: a map stores `(K, V)`
//! pairs keyed by their first component, a set stores its elements as their own keys.
//! Both hold at most one entry per key and never overwrite on insertion.
//!
//! [`Stack`] adapts any [`BackSequence`], such as [`Vec`](alloc::vec::Vec) or
//! [`VecDeque`](alloc::collections::VecDeque), into a last-in first-out stack.

#![cfg_attr(not(test), no_std)]
#![feature(allocator_api)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
pub mod map;
pub mod set;
pub mod stack;

pub use error::Error;
pub use map::Map;
pub use rbtree::{Compare, Greater, Less};
pub use set::Set;
pub use stack::{BackSequence, Stack};

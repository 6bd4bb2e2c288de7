// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![allow(unused, reason = "not used by all tests")]

use std::alloc::{AllocError, Allocator, Global, Layout};
use std::cell::Cell;
use std::cmp::Ordering;
use std::ptr::NonNull;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber honoring `RUST_LOG`, e.g. `RUST_LOG=rbtree=trace`.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An allocator that fails once a fixed number of allocations has been handed out.
///
/// Clones share their budget and counters.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    remaining: Rc<Cell<usize>>,
    allocations: Rc<Cell<usize>>,
}

impl Budget {
    pub fn new(allocations: usize) -> Self {
        Self {
            remaining: Rc::new(Cell::new(allocations)),
            allocations: Rc::new(Cell::new(0)),
        }
    }

    /// Sets the number of allocations that may still succeed.
    pub fn set_remaining(&self, allocations: usize) {
        self.remaining.set(allocations);
    }

    /// Returns the number of successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }
}

unsafe impl Allocator for Budget {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(AllocError);
        }
        let ptr = Global.allocate(layout)?;
        self.remaining.set(remaining - 1);
        self.allocations.set(self.allocations.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { Global.deallocate(ptr, layout) }
    }
}

/// A value that counts how often it has been dropped. Ordered by `key` only.
#[derive(Debug, Clone)]
pub struct Tracked {
    pub key: u32,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    pub fn new(key: u32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            key,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Upper bound on the height of a red-black tree holding `len` elements.
pub fn max_height(len: usize) -> usize {
    // 2 * log2(len + 1), rounded down
    2 * (usize::BITS - 1 - (len + 1).leading_zeros()) as usize
}

// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rbtree::{Identity, RbTree};

fuzz_target!(|inserts: Vec<u16>| {
    let mut tree: RbTree<u16, Identity> = RbTree::new();

    for i in inserts {
        tree.insert(i);
        tree.assert_valid();
    }
});

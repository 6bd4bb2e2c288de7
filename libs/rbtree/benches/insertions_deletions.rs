// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::BTreeSet;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::seq::SliceRandom;
use rbtree::{Identity, RbTree};

fn rbtree(inserts: &[usize], deletes: &[usize]) {
    let mut tree: RbTree<usize, Identity> = RbTree::new();

    for i in inserts {
        tree.insert(*i);
    }

    for i in deletes {
        tree.remove(i);
    }
}

fn btree(inserts: &[usize], deletes: &[usize]) {
    let mut tree = BTreeSet::new();

    for i in inserts {
        tree.insert(*i);
    }

    for i in deletes {
        tree.remove(i);
    }
}

fn rbtree_search(tree: &RbTree<usize, Identity>, searches: &[usize]) {
    for i in searches {
        black_box(tree.get(i));
    }
}

fn btree_search(tree: &BTreeSet<usize>, searches: &[usize]) {
    for i in searches {
        black_box(tree.get(i));
    }
}

fn bench_insertions_deletions(c: &mut Criterion) {
    let mut rng = rand::rng();

    let mut nums = (0..700).collect::<Vec<_>>();
    nums.shuffle(&mut rng);
    let inserts = nums.clone();
    nums.shuffle(&mut rng);
    let deletes = nums;

    let mut group = c.benchmark_group("Insertions & Deletions");
    group.bench_function("RbTree", |b| b.iter(|| rbtree(&inserts, &deletes)));
    group.bench_function("BTreeSet", |b| b.iter(|| btree(&inserts, &deletes)));
    group.finish();
}

fn bench_searches(c: &mut Criterion) {
    let mut rng = rand::rng();

    let mut nums = (0..10_000).collect::<Vec<_>>();
    nums.shuffle(&mut rng);
    let rb: RbTree<usize, Identity> = nums.iter().copied().collect();
    let bt: BTreeSet<usize> = nums.iter().copied().collect();
    nums.shuffle(&mut rng);

    let mut group = c.benchmark_group("Searches");
    group.bench_function("RbTree", |b| b.iter(|| rbtree_search(&rb, &nums)));
    group.bench_function("BTreeSet", |b| b.iter(|| btree_search(&bt, &nums)));
    group.finish();
}

criterion_group!(benches, bench_insertions_deletions, bench_searches);
criterion_main!(benches);

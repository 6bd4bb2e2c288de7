// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::fmt;

use crate::node::{NodePool, NodeRef};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Returns the side of `parent` that `node` hangs off.
pub(crate) fn side_of<T>(node: NodeRef, parent: NodeRef, pool: &NodePool<T>) -> Side {
    if parent.left(pool) == node {
        Side::Left
    } else {
        debug_assert_eq!(
            parent.right(pool),
            node,
            "node {parent:?} is not a parent of {node:?}"
        );
        Side::Right
    }
}

pub(crate) fn find_minimum<T>(mut curr: NodeRef, pool: &NodePool<T>) -> NodeRef {
    while !curr.left(pool).is_nil() {
        curr = curr.left(pool);
    }

    curr
}

pub(crate) fn find_maximum<T>(mut curr: NodeRef, pool: &NodePool<T>) -> NodeRef {
    while !curr.right(pool).is_nil() {
        curr = curr.right(pool);
    }

    curr
}

/// Returns the in-order successor of `node`.
///
/// The successor of the last node is the sentinel, and the successor of the sentinel
/// is the first node (or the sentinel itself when the tree is empty).
pub(crate) fn next<T>(node: NodeRef, pool: &NodePool<T>) -> NodeRef {
    if node.is_nil() {
        // the sentinel's parent link always points at the root
        let root = NodeRef::NIL.parent(pool);
        return if root.is_nil() {
            NodeRef::NIL
        } else {
            find_minimum(root, pool)
        };
    }

    let right = node.right(pool);
    if !right.is_nil() {
        return find_minimum(right, pool);
    }

    let mut curr = node;
    let mut parent = curr.parent(pool);
    while !parent.is_nil() && parent.right(pool) == curr {
        curr = parent;
        parent = parent.parent(pool);
    }
    parent
}

/// Returns the in-order predecessor of `node`.
///
/// Mirror image of [`next`]: the predecessor of the sentinel is the last node.
pub(crate) fn prev<T>(node: NodeRef, pool: &NodePool<T>) -> NodeRef {
    if node.is_nil() {
        let root = NodeRef::NIL.parent(pool);
        return if root.is_nil() {
            NodeRef::NIL
        } else {
            find_maximum(root, pool)
        };
    }

    let left = node.left(pool);
    if !left.is_nil() {
        return find_maximum(left, pool);
    }

    let mut curr = node;
    let mut parent = curr.parent(pool);
    while !parent.is_nil() && parent.left(pool) == curr {
        curr = parent;
        parent = parent.parent(pool);
    }
    parent
}

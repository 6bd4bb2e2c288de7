// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # An allocator-aware red-black tree.
//!
//! [`RbTree`] is a self-balancing binary search tree that keeps its elements sorted
//! by a key extracted from each element. Red-black trees bound their height to
//! `2 * log2(n + 1)` by coloring every node red or black and upholding the following
//! rules after every mutation:
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from a node down to a leaf passes the same number of black nodes.
//!
//! All nodes of a tree live in a single arena obtained from the tree's [`Allocator`]
//! and refer to each other through 32-bit slot indices. Slot zero holds a black
//! *sentinel* node that stands in for every missing child and doubles as the
//! past-the-end position of the sequence. The sentinel's parent link always points
//! at the root, which lets a cursor step backwards from the end.
//!
//! The tree itself is agnostic to what it stores: a [`KeyOf`] strategy extracts the
//! key from an element ([`Identity`] for sets, [`First`] for `(key, value)` maps) and
//! a [`Compare`] predicate orders the keys ([`Less`] by default).
//!
//! ## features
//!
//! The following features are available:
//!
//! | Feature | Default | Explanation                                                                            |
//! |:--------|:--------|:---------------------------------------------------------------------------------------|
//! | `dot`   | `false` | Enables the `RbTree::dot` method, which allows display of the tree in [graphviz format] |
//!
//! [graphviz format]: https://graphviz.org/doc/info/lang.html

#![cfg_attr(not(test), no_std)]
#![feature(allocator_api)]
#![warn(missing_docs)]

extern crate alloc;

mod compare;
mod cursor;
#[cfg(feature = "dot")]
mod dot;
mod iter;
mod node;
mod utils;

use alloc::alloc::{Global, handle_alloc_error};
use core::alloc::{AllocError, Allocator, Layout};
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::marker::PhantomData;
use core::ops::{Bound, RangeBounds};
use core::{fmt, mem};

pub use compare::{Compare, First, Greater, Identity, KeyOf, Less};
pub use cursor::{Cursor, CursorMut};
#[cfg(feature = "dot")]
pub use dot::Dot;
pub use iter::{IntoIter, Iter, IterMut};
pub use node::Color;

use crate::node::{Node, NodePool, NodeRef};
use crate::utils::Side;

/// Largest number of elements a tree can hold. Slot zero of the arena is taken by the
/// sentinel and slots are addressed by `u32`.
const MAX_LEN: usize = (u32::MAX - 1) as usize;

/// An ordered collection based on a [red-black tree].
///
/// Elements of type `T` are ordered by the key that `X` extracts from them, as judged
/// by the comparator `C`. The tree holds at most one element per key: inserting an
/// element whose key is equivalent to a present one leaves the tree untouched.
///
/// All nodes are allocated from `A` in a single growable arena, so inserting into a
/// tree whose arena has spare (or previously freed) slots performs no allocation.
///
/// It is a logic error for an element's key to change, through interior mutability or
/// the `_mut` accessors, in a way that alters its ordering relative to the other
/// elements. The behavior resulting from such a logic error is not specified, but
/// will be encapsulated to the `RbTree` that observed it and never be undefined
/// behavior.
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<T, X, C = Less, A: Allocator = Global> {
    pool: NodePool<T>,
    root: NodeRef,
    len: usize,
    comp: C,
    alloc: A,
    _key: PhantomData<fn() -> X>,
}

/// Result of walking down the tree looking for a key.
#[derive(Debug, Clone, Copy)]
enum Search {
    /// A node with an equivalent key exists.
    Found(NodeRef),
    /// No such node exists; a new node would hang off `parent` on `side`.
    Vacant { parent: NodeRef, side: Side },
}

// Safety: the tree owns its elements, comparator and allocator. The arena is only
// reachable through the tree and follows the usual borrowing rules.
unsafe impl<T: Send, X, C: Send, A: Allocator + Send> Send for RbTree<T, X, C, A> {}
// Safety: see above, `&RbTree` only ever hands out `&T`, `&C` and `&A`.
unsafe impl<T: Sync, X, C: Sync, A: Allocator + Sync> Sync for RbTree<T, X, C, A> {}

impl<T, X> RbTree<T, X> {
    /// Creates a new, empty tree ordered by [`Less`].
    ///
    /// This performs the initial allocation of the node arena, aborting through
    /// [`handle_alloc_error`] if it fails.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator_in(Less, Global)
    }

    /// Creates a new, empty tree ordered by [`Less`].
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the initial allocation of the node arena fails.
    pub fn try_new() -> Result<Self, AllocError> {
        Self::try_with_comparator_in(Less, Global)
    }
}

impl<T, X, C> RbTree<T, X, C> {
    /// Creates a new, empty tree ordered by `comp`.
    #[must_use]
    pub fn with_comparator(comp: C) -> Self {
        Self::with_comparator_in(comp, Global)
    }
}

impl<T, X, A: Allocator> RbTree<T, X, Less, A> {
    /// Creates a new, empty tree ordered by [`Less`] that allocates its nodes from `alloc`.
    #[must_use]
    pub fn new_in(alloc: A) -> Self {
        Self::with_comparator_in(Less, alloc)
    }

    /// Creates a new, empty tree ordered by [`Less`] that allocates its nodes from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the initial allocation of the node arena fails.
    pub fn try_new_in(alloc: A) -> Result<Self, AllocError> {
        Self::try_with_comparator_in(Less, alloc)
    }
}

impl<T, X, C, A: Allocator> RbTree<T, X, C, A> {
    /// Creates a new, empty tree ordered by `comp` that allocates its nodes from `alloc`.
    #[must_use]
    pub fn with_comparator_in(comp: C, alloc: A) -> Self {
        match Self::try_with_comparator_in(comp, alloc) {
            Ok(tree) => tree,
            Err(AllocError) => handle_alloc_error(Self::node_layout()),
        }
    }

    /// Creates a new, empty tree ordered by `comp` that allocates its nodes from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the initial allocation of the node arena fails.
    pub fn try_with_comparator_in(comp: C, alloc: A) -> Result<Self, AllocError> {
        let mut out = Self {
            pool: NodePool::new(),
            root: NodeRef::NIL,
            len: 0,
            comp,
            alloc,
            _key: PhantomData,
        };
        // Safety: the pool is only ever used with `out.alloc`
        unsafe { out.pool.init(&out.alloc)? };
        Ok(out)
    }

    /// Returns the number of elements in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.root.is_nil(), self.len == 0);
        self.len == 0
    }

    /// Returns the largest number of elements any tree can hold.
    #[inline]
    pub fn max_len(&self) -> usize {
        MAX_LEN
    }

    /// Returns a reference to the comparator ordering this tree.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comp
    }

    /// Returns a reference to the underlying allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Gets an iterator over the elements of the tree, in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.first_node(),
            tail: self.last_node(),
            len: self.len,
            pool: &self.pool,
        }
    }

    /// Gets a mutable iterator over the elements of the tree, in sorted order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.first_node(),
            tail: self.last_node(),
            len: self.len,
            pool: &mut self.pool,
        }
    }

    /// Returns a cursor pointing at the first element of the tree, or at the end
    /// position if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, T, X, C, A> {
        Cursor {
            current: self.first_node(),
            tree: self,
        }
    }

    /// Returns a cursor pointing at the end position, one past the last element.
    ///
    /// Moving this cursor backwards yields the last element, moving it forwards
    /// yields the first.
    pub fn end(&self) -> Cursor<'_, T, X, C, A> {
        Cursor {
            current: NodeRef::NIL,
            tree: self,
        }
    }

    /// Returns a mutable cursor pointing at the first element of the tree, or at the
    /// end position if the tree is empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, X, C, A> {
        CursorMut {
            current: self.first_node(),
            tree: self,
        }
    }

    /// Returns a mutable cursor pointing at the end position, one past the last element.
    pub fn end_mut(&mut self) -> CursorMut<'_, T, X, C, A> {
        CursorMut {
            current: NodeRef::NIL,
            tree: self,
        }
    }

    /// Returns the smallest element in the tree.
    pub fn first(&self) -> Option<&T> {
        let node = self.first_node();
        // Safety: non-sentinel nodes reachable from the root are live
        (!node.is_nil()).then(|| unsafe { node.value(&self.pool) })
    }

    /// Returns the largest element in the tree.
    pub fn last(&self) -> Option<&T> {
        let node = self.last_node();
        // Safety: non-sentinel nodes reachable from the root are live
        (!node.is_nil()).then(|| unsafe { node.value(&self.pool) })
    }

    /// Removes and returns the smallest element in the tree.
    pub fn pop_first(&mut self) -> Option<T> {
        let node = self.first_node();
        // Safety: `node` is a live node of this tree
        (!node.is_nil()).then(|| unsafe { self.erase_node(node).0 })
    }

    /// Removes and returns the largest element in the tree.
    pub fn pop_last(&mut self) -> Option<T> {
        let node = self.last_node();
        // Safety: `node` is a live node of this tree
        (!node.is_nil()).then(|| unsafe { self.erase_node(node).0 })
    }

    /// Retains only the elements for which `f` returns `true`, visiting them in
    /// ascending order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut curr = self.first_node();
        while !curr.is_nil() {
            // Safety: `curr` is a live node of this tree
            if f(unsafe { curr.value_mut(&mut self.pool) }) {
                curr = utils::next(curr, &self.pool);
            } else {
                // Safety: `curr` is a live node of this tree
                let (value, next) = unsafe { self.erase_node(curr) };
                drop(value);
                curr = next;
            }
        }
    }

    /// Removes all elements from the tree.
    ///
    /// The node arena is kept, so refilling the tree up to its previous size performs
    /// no allocations.
    pub fn clear(&mut self) {
        let root = mem::replace(&mut self.root, NodeRef::NIL);
        self.len = 0;
        self.update_sentinel();

        if mem::needs_drop::<T>() && !root.is_nil() {
            self.drop_subtree(root);
        }

        self.pool.clear();
    }

    /// Swaps the contents of `self` and `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.height_inner(self.root)
    }

    #[cfg(feature = "dot")]
    /// Returns a value that formats the tree in [graphviz format].
    ///
    /// [graphviz format]: https://graphviz.org/doc/info/lang.html
    pub fn dot(&self) -> Dot<'_, T, X, C, A> {
        Dot { tree: self }
    }

    fn height_inner(&self, node: NodeRef) -> usize {
        if node.is_nil() {
            return 0;
        }
        let left = self.height_inner(node.left(&self.pool));
        let right = self.height_inner(node.right(&self.pool));
        left.max(right) + 1
    }

    fn node_layout() -> Layout {
        Layout::new::<Node<T>>()
    }

    pub(crate) fn first_node(&self) -> NodeRef {
        if self.root.is_nil() {
            NodeRef::NIL
        } else {
            utils::find_minimum(self.root, &self.pool)
        }
    }

    pub(crate) fn last_node(&self) -> NodeRef {
        if self.root.is_nil() {
            NodeRef::NIL
        } else {
            utils::find_maximum(self.root, &self.pool)
        }
    }

    /// Points the sentinel's parent link at the current root.
    #[inline]
    fn update_sentinel(&mut self) {
        NodeRef::NIL.set_parent(self.root, &mut self.pool);
    }

    /// Drops every payload below (and including) `node` in place. Links are left alone.
    fn drop_subtree(&mut self, node: NodeRef) {
        let left = node.left(&self.pool);
        if !left.is_nil() {
            self.drop_subtree(left);
        }
        let right = node.right(&self.pool);
        if !right.is_nil() {
            self.drop_subtree(right);
        }
        // Safety: every node below the root is live and is dropped exactly once
        unsafe { node.drop_value(&mut self.pool) };
    }

    /// Allocates a red node holding `value` and links it as the `side` child of `parent`
    /// (or as the root if `parent` is the sentinel), then restores the tree invariants.
    fn link_new(&mut self, value: T, parent: NodeRef, side: Side) -> Result<NodeRef, AllocError> {
        // Safety: the pool is only ever used with `self.alloc`
        let node = unsafe { self.pool.alloc_node(value, Color::Red, &self.alloc)? };

        node.set_parent(parent, &mut self.pool);
        if parent.is_nil() {
            tracing::trace!("{node:?} is the new root");
            self.root = node;
        } else {
            parent.set_child(side, node, &mut self.pool);
        }
        self.len += 1;

        self.balance_after_insert(node);
        self.update_sentinel();

        Ok(node)
    }

    /// Unlinks `node` from the tree and frees its slot, returning the payload that was
    /// stored at that position along with the position of the element that followed it.
    ///
    /// When `node` has two children, its in-order successor is spliced out instead and
    /// the successor's payload is moved into `node`'s slot. The returned position is
    /// `node` itself in that case.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree.
    pub(crate) unsafe fn erase_node(&mut self, node: NodeRef) -> (T, NodeRef) {
        assert!(!node.is_nil(), "cannot remove the end position");

        let pool = &mut self.pool;
        let (spliced, next) = if node.left(pool).is_nil() || node.right(pool).is_nil() {
            (node, utils::next(node, pool))
        } else {
            let successor = utils::find_minimum(node.right(pool), pool);
            tracing::trace!("moving successor {successor:?} into {node:?}");
            // Safety: both nodes are live and distinct
            unsafe { pool.swap_values(node, successor) };
            (successor, node)
        };

        // `spliced` has at most one child which takes its place
        let child = if spliced.left(pool).is_nil() {
            spliced.right(pool)
        } else {
            spliced.left(pool)
        };
        let spliced_color = spliced.color(pool);
        self.transplant(spliced, child);

        if spliced_color == Color::Black {
            self.balance_after_remove(child);
        }

        // Safety: `spliced` is unlinked now and is freed exactly once
        let value = unsafe { self.pool.free_node(spliced) };
        self.len -= 1;
        self.update_sentinel();

        (value, next)
    }

    /// Replaces the subtree rooted at `old` with the subtree rooted at `new`.
    ///
    /// `new` may be the sentinel, in which case its parent link records where the
    /// subtree was detached.
    fn transplant(&mut self, old: NodeRef, new: NodeRef) {
        let parent = old.parent(&self.pool);
        if parent.is_nil() {
            self.root = new;
        } else {
            let side = utils::side_of(old, parent, &self.pool);
            parent.set_child(side, new, &mut self.pool);
        }
        new.set_parent(parent, &mut self.pool);
    }

    /// Rotates the subtree rooted at `x` towards `side`, promoting the child on the
    /// opposite side.
    ///
    /// ```text
    ///       x                y
    ///      / \              / \
    ///     a   y     =>     x   c      (side = Left)
    ///        / \          / \
    ///       b   c        a   b
    /// ```
    fn rotate(&mut self, x: NodeRef, side: Side) {
        let pool = &mut self.pool;
        let y = x.child(side.opposite(), pool);
        debug_assert!(!y.is_nil(), "cannot rotate {x:?} {side} without a child to promote");

        // move `b` over to `x`
        let inner = y.child(side, pool);
        x.set_child(side.opposite(), inner, pool);
        if !inner.is_nil() {
            inner.set_parent(x, pool);
        }

        // put `y` where `x` was
        let parent = x.parent(pool);
        y.set_parent(parent, pool);
        if parent.is_nil() {
            self.root = y;
        } else {
            let x_side = utils::side_of(x, parent, pool);
            parent.set_child(x_side, y, pool);
        }

        y.set_child(side, x, pool);
        x.set_parent(y, pool);
    }

    fn balance_after_insert(&mut self, mut node: NodeRef) {
        loop {
            let pool = &mut self.pool;
            let parent = node.parent(pool);
            if !parent.is_red(pool) {
                break;
            }

            // a red parent is never the root, so the grandparent exists
            let grandparent = parent.parent(pool);
            let side = utils::side_of(parent, grandparent, pool);
            let uncle = grandparent.child(side.opposite(), pool);

            if uncle.is_red(pool) {
                tracing::trace!("insert fixup at {node:?}: recolor, uncle {uncle:?} is red");
                parent.set_color(Color::Black, pool);
                uncle.set_color(Color::Black, pool);
                grandparent.set_color(Color::Red, pool);
                node = grandparent;
                continue;
            }

            if node == parent.child(side.opposite(), pool) {
                tracing::trace!("insert fixup at {node:?}: inner child, rotate {parent:?} {side}");
                node = parent;
                self.rotate(node, side);
            }

            let pool = &mut self.pool;
            let parent = node.parent(pool);
            let grandparent = parent.parent(pool);
            tracing::trace!(
                "insert fixup at {node:?}: outer child, rotate {grandparent:?} {}",
                side.opposite()
            );
            parent.set_color(Color::Black, pool);
            grandparent.set_color(Color::Red, pool);
            self.rotate(grandparent, side.opposite());
        }

        self.root.set_color(Color::Black, &mut self.pool);
    }

    /// Restores the black-height of the tree after a black node was spliced out above
    /// `node`, which now carries an extra unit of blackness.
    fn balance_after_remove(&mut self, mut node: NodeRef) {
        while node != self.root && node.is_black(&self.pool) {
            let pool = &mut self.pool;
            let parent = node.parent(pool);
            let side = if parent.left(pool) == node {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let mut sibling = parent.child(far, pool);

            if sibling.is_red(pool) {
                tracing::trace!("remove fixup at {node:?}: sibling {sibling:?} is red");
                sibling.set_color(Color::Black, pool);
                parent.set_color(Color::Red, pool);
                self.rotate(parent, side);
                sibling = parent.child(far, &self.pool);
            }

            let pool = &mut self.pool;
            let near_nephew = sibling.child(side, pool);
            let far_nephew = sibling.child(far, pool);

            if near_nephew.is_black(pool) && far_nephew.is_black(pool) {
                tracing::trace!("remove fixup at {node:?}: recolor sibling {sibling:?}");
                sibling.set_color(Color::Red, pool);
                node = parent;
                continue;
            }

            if far_nephew.is_black(pool) {
                tracing::trace!("remove fixup at {node:?}: near nephew is red, rotate {sibling:?} {far}");
                near_nephew.set_color(Color::Black, pool);
                sibling.set_color(Color::Red, pool);
                self.rotate(sibling, far);
                sibling = parent.child(far, &self.pool);
            }

            tracing::trace!("remove fixup at {node:?}: far nephew is red, rotate {parent:?} {side}");
            let pool = &mut self.pool;
            sibling.set_color(parent.color(pool), pool);
            parent.set_color(Color::Black, pool);
            sibling.child(far, pool).set_color(Color::Black, pool);
            self.rotate(parent, side);
            node = self.root;
        }

        node.set_color(Color::Black, &mut self.pool);
    }
}

impl<T, X, C, A> RbTree<T, X, C, A>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
    A: Allocator,
{
    /// Returns a cursor pointing at the element with the given key, or at the end
    /// position if there is no such element.
    ///
    /// The key may be any borrowed form of the element's key type, but the ordering on
    /// the borrowed form *must* match the ordering on the key type.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, T, X, C, A>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            current: self.find_node(key),
            tree: self,
        }
    }

    /// Returns a mutable cursor pointing at the element with the given key, or at the end
    /// position if there is no such element.
    ///
    /// The key may be any borrowed form of the element's key type, but the ordering on
    /// the borrowed form *must* match the ordering on the key type.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, T, X, C, A>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        CursorMut {
            current: self.find_node(key),
            tree: self,
        }
    }

    /// Returns a reference to the element with the given key.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.find(key).get()
    }

    /// Returns a mutable reference to the element with the given key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.find_mut(key).into_mut()
    }

    /// Returns `true` if the tree contains an element with the given key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        !self.find_node(key).is_nil()
    }

    /// Returns a cursor pointing at the first element whose key is not ordered before
    /// `key`, or at the end position if there is none.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, T, X, C, A>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            current: self.lower_bound_node(key),
            tree: self,
        }
    }

    /// Returns a mutable cursor pointing at the first element whose key is not ordered
    /// before `key`, or at the end position if there is none.
    pub fn lower_bound_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, T, X, C, A>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        CursorMut {
            current: self.lower_bound_node(key),
            tree: self,
        }
    }

    /// Returns a cursor pointing at the first element whose key is ordered after `key`,
    /// or at the end position if there is none.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, T, X, C, A>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            current: self.upper_bound_node(key),
            tree: self,
        }
    }

    /// Returns a mutable cursor pointing at the first element whose key is ordered after
    /// `key`, or at the end position if there is none.
    pub fn upper_bound_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, T, X, C, A>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        CursorMut {
            current: self.upper_bound_node(key),
            tree: self,
        }
    }

    /// Returns the pair `(lower_bound(key), upper_bound(key))`, delimiting the (at most
    /// one) element equivalent to `key`.
    pub fn equal_range<Q>(&self, key: &Q) -> (Cursor<'_, T, X, C, A>, Cursor<'_, T, X, C, A>)
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Inserts `value` into the tree.
    ///
    /// Returns a cursor pointing at the element with `value`'s key and whether `value`
    /// was inserted. If an element with an equivalent key is already present, the tree
    /// is left unchanged and `value` is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the node arena needs to grow and the allocation fails.
    /// `value` is dropped and the tree is left unchanged in that case.
    pub fn try_insert(
        &mut self,
        value: T,
    ) -> Result<(CursorMut<'_, T, X, C, A>, bool), AllocError> {
        let (current, inserted) = match self.search(X::key_of(&value)) {
            Search::Found(node) => (node, false),
            Search::Vacant { parent, side } => (self.link_new(value, parent, side)?, true),
        };

        Ok((
            CursorMut {
                current,
                tree: self,
            },
            inserted,
        ))
    }

    /// Inserts `value` into the tree.
    ///
    /// This is the infallible version of [`RbTree::try_insert`], allocation failures
    /// abort through [`handle_alloc_error`].
    pub fn insert(&mut self, value: T) -> (CursorMut<'_, T, X, C, A>, bool) {
        match self.try_insert(value) {
            Ok(res) => res,
            Err(AllocError) => handle_alloc_error(Self::node_layout()),
        }
    }

    /// Returns a mutable reference to the element with the given key, inserting the
    /// element built by `f` if there is none.
    ///
    /// `f` receives `key` back and must produce an element whose key is equivalent to
    /// it. It is only called if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the node arena needs to grow and the allocation fails.
    /// The built element is dropped and the tree is left unchanged in that case.
    pub fn try_get_or_insert_with<Q, F>(&mut self, key: Q, f: F) -> Result<&mut T, AllocError>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        F: FnOnce(Q) -> T,
    {
        let node = match self.search(&key) {
            Search::Found(node) => node,
            Search::Vacant { parent, side } => {
                let value = f(key);
                self.link_new(value, parent, side)?
            }
        };

        // Safety: `node` is a live node of this tree
        Ok(unsafe { node.value_mut(&mut self.pool) })
    }

    /// Returns a mutable reference to the element with the given key, inserting the
    /// element built by `f` if there is none.
    ///
    /// This is the infallible version of [`RbTree::try_get_or_insert_with`], allocation
    /// failures abort through [`handle_alloc_error`].
    pub fn get_or_insert_with<Q, F>(&mut self, key: Q, f: F) -> &mut T
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        F: FnOnce(Q) -> T,
    {
        match self.try_get_or_insert_with(key, f) {
            Ok(value) => value,
            Err(AllocError) => handle_alloc_error(Self::node_layout()),
        }
    }

    /// Removes the element with the given key from the tree, returning it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let node = self.find_node(key);
        // Safety: `node` is a live node of this tree
        (!node.is_nil()).then(|| unsafe { self.erase_node(node).0 })
    }

    /// Removes and drops the element with the given key, returning the number of
    /// elements removed (zero or one).
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.remove(key).is_some())
    }

    /// Removes and drops every element whose key lies within `range`, returning the
    /// number of elements removed.
    ///
    /// An empty or inverted range removes nothing.
    pub fn erase_range<Q, R>(&mut self, range: R) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        let mut curr = match range.start_bound() {
            Bound::Included(key) => self.lower_bound_node(key),
            Bound::Excluded(key) => self.upper_bound_node(key),
            Bound::Unbounded => self.first_node(),
        };

        let mut removed = 0;
        // the end is tested by key, since erasing a node may relocate its successor
        while !curr.is_nil() && self.below_end(curr, range.end_bound()) {
            // Safety: `curr` is a live node of this tree
            let (value, next) = unsafe { self.erase_node(curr) };
            drop(value);
            curr = next;
            removed += 1;
        }

        tracing::trace!("erased {removed} elements in range");
        removed
    }

    /// Returns a deep copy of the tree.
    ///
    /// The copy has the same shape and colors as `self` and uses a clone of the
    /// allocator and comparator.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if allocating the copy's node arena fails. Elements
    /// copied so far are dropped in that case.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        C: Clone,
        A: Clone,
    {
        let mut out = Self::try_with_comparator_in(self.comp.clone(), self.alloc.clone())?;
        if !self.root.is_nil() {
            out.clone_subtree(self, self.root, NodeRef::NIL, Side::Left)?;
        }
        out.len = self.len;
        out.update_sentinel();
        Ok(out)
    }

    /// Asserts as many of the tree's invariants as possible.
    ///
    /// # Panics
    ///
    /// Panics if the sentinel is not black or does not point at the root, if the root
    /// is not black, if parent and child links disagree, if a red node has a red child,
    /// if two paths have different black-heights, if the element count is off, or if
    /// the elements are not strictly ascending.
    #[track_caller]
    pub fn assert_valid(&self) {
        let pool = &self.pool;

        assert!(NodeRef::NIL.is_black(pool), "sentinel must be black");
        assert!(
            NodeRef::NIL.left(pool).is_nil() && NodeRef::NIL.right(pool).is_nil(),
            "sentinel must not have children"
        );
        assert_eq!(
            NodeRef::NIL.parent(pool),
            self.root,
            "sentinel parent must point at the root"
        );

        if self.root.is_nil() {
            assert_eq!(self.len, 0, "empty tree must have zero length");
            return;
        }

        assert!(self.root.is_black(pool), "root {:?} must be black", self.root);
        assert!(
            self.root.parent(pool).is_nil(),
            "root {:?} must not have a parent",
            self.root
        );

        let (count, _black_height) = self.assert_valid_inner(self.root);
        assert_eq!(
            count, self.len,
            "tree holds {count} reachable nodes but its length is {}",
            self.len
        );

        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            let mut prev = X::key_of(first);
            for value in iter {
                let key = X::key_of(value);
                assert!(
                    self.comp.less(prev, key),
                    "ordering violation: elements are not strictly ascending"
                );
                prev = key;
            }
        }
    }

    /// Returns the number of nodes in the subtree rooted at `node` and its black-height.
    #[track_caller]
    fn assert_valid_inner(&self, node: NodeRef) -> (usize, usize) {
        let pool = &self.pool;
        if node.is_nil() {
            return (0, 1);
        }

        let left = node.left(pool);
        let right = node.right(pool);
        for child in [left, right] {
            if !child.is_nil() {
                assert_eq!(
                    child.parent(pool),
                    node,
                    "parent link of {child:?} does not point at {node:?}"
                );
            }
        }

        if node.is_red(pool) {
            assert!(
                left.is_black(pool) && right.is_black(pool),
                "red node {node:?} has a red child"
            );
        }

        let (left_count, left_height) = self.assert_valid_inner(left);
        let (right_count, right_height) = self.assert_valid_inner(right);
        assert_eq!(
            left_height, right_height,
            "black-height mismatch below {node:?}: left {left_height}, right {right_height}"
        );

        (
            left_count + right_count + 1,
            left_height + usize::from(node.is_black(pool)),
        )
    }

    fn clone_subtree(
        &mut self,
        src: &Self,
        node: NodeRef,
        parent: NodeRef,
        side: Side,
    ) -> Result<(), AllocError>
    where
        T: Clone,
    {
        // Safety: `node` is a live node of `src`
        let value = unsafe { node.value(&src.pool) }.clone();
        // Safety: the pool is only ever used with `self.alloc`
        let copy = unsafe { self.pool.alloc_node(value, node.color(&src.pool), &self.alloc)? };

        // link right away so a later failure drops everything copied so far
        copy.set_parent(parent, &mut self.pool);
        if parent.is_nil() {
            self.root = copy;
        } else {
            parent.set_child(side, copy, &mut self.pool);
        }

        let left = node.left(&src.pool);
        if !left.is_nil() {
            self.clone_subtree(src, left, copy, Side::Left)?;
        }
        let right = node.right(&src.pool);
        if !right.is_nil() {
            self.clone_subtree(src, right, copy, Side::Right)?;
        }

        Ok(())
    }

    fn key_at<Q>(&self, node: NodeRef) -> &Q
    where
        X::Key: Borrow<Q>,
        Q: ?Sized,
    {
        // Safety: callers only pass live nodes reachable from the root
        let key = X::key_of(unsafe { node.value(&self.pool) });
        <X::Key as Borrow<Q>>::borrow(key)
    }

    fn below_end<Q>(&self, node: NodeRef, end: Bound<&Q>) -> bool
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        match end {
            Bound::Included(key) => !self.comp.less(key, self.key_at(node)),
            Bound::Excluded(key) => self.comp.less(self.key_at(node), key),
            Bound::Unbounded => true,
        }
    }

    fn lower_bound_node<Q>(&self, key: &Q) -> NodeRef
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        let mut bound = NodeRef::NIL;
        while !curr.is_nil() {
            if self.comp.less(self.key_at(curr), key) {
                curr = curr.right(&self.pool);
            } else {
                bound = curr;
                curr = curr.left(&self.pool);
            }
        }
        bound
    }

    fn upper_bound_node<Q>(&self, key: &Q) -> NodeRef
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        let mut bound = NodeRef::NIL;
        while !curr.is_nil() {
            if self.comp.less(key, self.key_at(curr)) {
                bound = curr;
                curr = curr.left(&self.pool);
            } else {
                curr = curr.right(&self.pool);
            }
        }
        bound
    }

    fn find_node<Q>(&self, key: &Q) -> NodeRef
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        match self.search(key) {
            Search::Found(node) => node,
            Search::Vacant { .. } => NodeRef::NIL,
        }
    }

    fn search<Q>(&self, key: &Q) -> Search
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut parent = NodeRef::NIL;
        let mut side = Side::Left;
        let mut curr = self.root;

        while !curr.is_nil() {
            let curr_key = self.key_at(curr);
            side = if self.comp.less(key, curr_key) {
                Side::Left
            } else if self.comp.less(curr_key, key) {
                Side::Right
            } else {
                return Search::Found(curr);
            };

            parent = curr;
            curr = curr.child(side, &self.pool);
        }

        Search::Vacant { parent, side }
    }
}

impl<T, X, C, A: Allocator> Drop for RbTree<T, X, C, A> {
    fn drop(&mut self) {
        // Drop values. We don't need to unlink the nodes since we're about to
        // free the arena anyways.
        if mem::needs_drop::<T>() && !self.root.is_nil() {
            self.drop_subtree(self.root);
        }

        // Safety: the pool is only ever used with `self.alloc`
        unsafe { self.pool.free(&self.alloc) };
    }
}

impl<T, X, C: Default, A: Allocator + Default> Default for RbTree<T, X, C, A> {
    fn default() -> Self {
        Self::with_comparator_in(C::default(), A::default())
    }
}

impl<T, X, C, A> Clone for RbTree<T, X, C, A>
where
    T: Clone,
    X: KeyOf<T>,
    C: Compare<X::Key> + Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(tree) => tree,
            Err(AllocError) => handle_alloc_error(Self::node_layout()),
        }
    }
}

impl<T: fmt::Debug, X, C, A: Allocator> fmt::Debug for RbTree<T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, X, C, A: Allocator> PartialEq for RbTree<T, X, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, X, C, A: Allocator> Eq for RbTree<T, X, C, A> {}

impl<T: PartialOrd, X, C, A: Allocator> PartialOrd for RbTree<T, X, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, X, C, A: Allocator> Ord for RbTree<T, X, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, X, C, A> Extend<T> for RbTree<T, X, C, A>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, X, C> FromIterator<T> for RbTree<T, X, C>
where
    X: KeyOf<T>,
    C: Compare<X::Key> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::with_comparator(C::default());
        tree.extend(iter);
        tree
    }
}

impl<T, X, C, A: Allocator> IntoIterator for RbTree<T, X, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T, X, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<'a, T, X, C, A: Allocator> IntoIterator for &'a RbTree<T, X, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, X, C, A: Allocator> IntoIterator for &'a mut RbTree<T, X, C, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

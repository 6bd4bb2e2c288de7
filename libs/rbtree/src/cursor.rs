// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::alloc::Allocator;
use core::{fmt, ptr};

use crate::node::{Color, NodeRef};
use crate::{RbTree, utils};

/// A cursor which provides read-only access to a [`RbTree`].
///
/// A cursor points either at an element or at the end position. The end position
/// joins both ends of the sequence: moving forward from it yields the first element,
/// moving backward yields the last.
pub struct Cursor<'a, T, X, C, A: Allocator> {
    pub(crate) current: NodeRef,
    pub(crate) tree: &'a RbTree<T, X, C, A>,
}

impl<T, X, C, A: Allocator> Clone for Cursor<'_, T, X, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, X, C, A: Allocator> Copy for Cursor<'_, T, X, C, A> {}

impl<T, X, C, A: Allocator> PartialEq for Cursor<'_, T, X, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && ptr::eq(self.tree, other.tree)
    }
}

impl<T, X, C, A: Allocator> Eq for Cursor<'_, T, X, C, A> {}

impl<T: fmt::Debug, X, C, A: Allocator> fmt::Debug for Cursor<'_, T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current)
            .field("value", &self.get())
            .finish_non_exhaustive()
    }
}

impl<'a, T, X, C, A: Allocator> Cursor<'a, T, X, C, A> {
    /// Returns a reference to the element under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        if self.current.is_nil() {
            return None;
        }
        let tree: &'a RbTree<T, X, C, A> = self.tree;
        // Safety: the cursor only ever points at live nodes of `tree` or the sentinel
        Some(unsafe { self.current.value(&tree.pool) })
    }

    /// Returns the color of the node under the cursor, or `None` at the end position.
    pub fn color(&self) -> Option<Color> {
        (!self.current.is_nil()).then(|| self.current.color(&self.tree.pool))
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_nil()
    }

    /// Moves the cursor to the next element in sorted order.
    ///
    /// Moving past the last element lands on the end position, moving forward from the
    /// end position lands on the first element.
    pub fn move_next(&mut self) {
        self.current = utils::next(self.current, &self.tree.pool);
    }

    /// Moves the cursor to the previous element in sorted order.
    ///
    /// Moving before the first element lands on the end position, moving backward from
    /// the end position lands on the last element.
    pub fn move_prev(&mut self) {
        self.current = utils::prev(self.current, &self.tree.pool);
    }

    /// Returns a reference to the element the cursor would move to with [`Cursor::move_next`].
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = *self;
        next.move_next();
        next.get()
    }

    /// Returns a reference to the element the cursor would move to with [`Cursor::move_prev`].
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut prev = *self;
        prev.move_prev();
        prev.get()
    }
}

/// A cursor which provides mutable access to a [`RbTree`].
///
/// Besides navigating like a [`Cursor`], a `CursorMut` can remove the element it
/// points at.
pub struct CursorMut<'a, T, X, C, A: Allocator> {
    pub(crate) current: NodeRef,
    pub(crate) tree: &'a mut RbTree<T, X, C, A>,
}

impl<T: fmt::Debug, X, C, A: Allocator> fmt::Debug for CursorMut<'_, T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.current)
            .field("value", &self.get())
            .finish_non_exhaustive()
    }
}

impl<'a, T, X, C, A: Allocator> CursorMut<'a, T, X, C, A> {
    /// Returns a reference to the element under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&T> {
        // Safety: the cursor only ever points at live nodes of `tree` or the sentinel
        (!self.current.is_nil()).then(|| unsafe { self.current.value(&self.tree.pool) })
    }

    /// Returns a mutable reference to the element under the cursor, or `None` at the end
    /// position.
    ///
    /// Changing the element's key in a way that alters its ordering is a logic error.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.current.is_nil() {
            return None;
        }
        // Safety: the cursor only ever points at live nodes of `tree`
        Some(unsafe { self.current.value_mut(&mut self.tree.pool) })
    }

    /// Converts the cursor into a mutable reference to the element under it, borrowing
    /// from the tree for the cursor's whole lifetime.
    pub fn into_mut(self) -> Option<&'a mut T> {
        if self.current.is_nil() {
            return None;
        }
        let tree = self.tree;
        // Safety: the cursor only ever points at live nodes of `tree`
        Some(unsafe { self.current.value_mut(&mut tree.pool) })
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_nil()
    }

    /// Moves the cursor to the next element in sorted order, see [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        self.current = utils::next(self.current, &self.tree.pool);
    }

    /// Moves the cursor to the previous element in sorted order, see [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        self.current = utils::prev(self.current, &self.tree.pool);
    }

    /// Returns a read-only cursor pointing at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, X, C, A> {
        Cursor {
            current: self.current,
            tree: &*self.tree,
        }
    }

    /// Removes the element under the cursor from the tree and returns it, or returns
    /// `None` at the end position.
    ///
    /// The cursor is left pointing at the element that followed the removed one (or at
    /// the end position). Removing an element with two children moves its successor
    /// into the removed element's node, so the cursor keeps pointing at the same node.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.current.is_nil() {
            return None;
        }

        // Safety: the cursor only ever points at live nodes of `tree`
        let (value, next) = unsafe { self.tree.erase_node(self.current) };
        self.current = next;
        Some(value)
    }
}

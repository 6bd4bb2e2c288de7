// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::alloc::Allocator;
use core::fmt;
use core::iter::FusedIterator;

use crate::node::{NodePool, NodeRef};
use crate::{RbTree, utils};

/// An iterator over the elements of a [`RbTree`], in sorted order.
///
/// This struct is created by [`RbTree::iter`].
pub struct Iter<'a, T> {
    pub(crate) head: NodeRef,
    pub(crate) tail: NodeRef,
    pub(crate) len: usize,
    pub(crate) pool: &'a NodePool<T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            len: self.len,
            pool: self.pool,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.head;
        self.head = utils::next(node, self.pool);
        self.len -= 1;
        // Safety: the first `len` nodes from `head` are live nodes of the tree
        Some(unsafe { node.value(self.pool) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.tail;
        self.tail = utils::prev(node, self.pool);
        self.len -= 1;
        // Safety: the last `len` nodes up to `tail` are live nodes of the tree
        Some(unsafe { node.value(self.pool) })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a [`RbTree`], in sorted order.
///
/// This struct is created by [`RbTree::iter_mut`].
pub struct IterMut<'a, T> {
    pub(crate) head: NodeRef,
    pub(crate) tail: NodeRef,
    pub(crate) len: usize,
    pub(crate) pool: &'a mut NodePool<T>,
}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.head;
        self.head = utils::next(node, self.pool);
        self.len -= 1;
        // Safety: the first `len` nodes from `head` are live nodes of the tree and every
        // node is yielded at most once, so the returned references never alias
        Some(unsafe { node.value_ptr(self.pool).as_mut() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.tail;
        self.tail = utils::prev(node, self.pool);
        self.len -= 1;
        // Safety: the last `len` nodes up to `tail` are live nodes of the tree and every
        // node is yielded at most once, so the returned references never alias
        Some(unsafe { node.value_ptr(self.pool).as_mut() })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a [`RbTree`], in sorted order.
///
/// This struct is created by the `into_iter` method on [`RbTree`] (provided by the
/// [`IntoIterator`] trait). Elements not yielded are dropped together with the iterator.
pub struct IntoIter<T, X, C, A: Allocator> {
    pub(crate) tree: RbTree<T, X, C, A>,
}

impl<T: fmt::Debug, X, C, A: Allocator> fmt::Debug for IntoIter<T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.tree).finish()
    }
}

impl<T, X, C, A: Allocator> Iterator for IntoIter<T, X, C, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, X, C, A: Allocator> DoubleEndedIterator for IntoIter<T, X, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<T, X, C, A: Allocator> ExactSizeIterator for IntoIter<T, X, C, A> {}
impl<T, X, C, A: Allocator> FusedIterator for IntoIter<T, X, C, A> {}

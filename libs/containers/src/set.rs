// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! An ordered set over a red-black tree.

use alloc::alloc::Global;
use core::alloc::Allocator;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::ops::RangeBounds;

use rbtree::{Compare, Identity, Less, RbTree};

use crate::Error;

/// An iterator over the elements of a [`Set`], in ascending order.
pub type Iter<'a, T> = rbtree::Iter<'a, T>;

/// An owning iterator over the elements of a [`Set`], in ascending order.
pub type IntoIter<T, C, A> = rbtree::IntoIter<T, Identity, C, A>;

/// An ordered set of unique elements of type `T`.
///
/// Elements are kept sorted under the comparator `C` ([`Less`] by default) in an
/// [`RbTree`] whose nodes are allocated from `A`. Two elements are considered equal
/// when neither is ordered before the other.
pub struct Set<T, C = Less, A: Allocator = Global> {
    tree: RbTree<T, Identity, C, A>,
}

impl<T> Set<T> {
    /// Creates an empty set ordered by [`Less`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    /// Creates an empty set ordered by [`Less`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if the initial allocation fails.
    pub fn try_new() -> Result<Self, Error> {
        Ok(Self {
            tree: RbTree::try_new()?,
        })
    }
}

impl<T, C> Set<T, C> {
    /// Creates an empty set ordered by `comp`.
    #[must_use]
    pub fn with_comparator(comp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comp),
        }
    }
}

impl<T, A: Allocator> Set<T, Less, A> {
    /// Creates an empty set ordered by [`Less`] that allocates from `alloc`.
    #[must_use]
    pub fn new_in(alloc: A) -> Self {
        Self {
            tree: RbTree::new_in(alloc),
        }
    }

    /// Creates an empty set ordered by [`Less`] that allocates from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if the initial allocation fails.
    pub fn try_new_in(alloc: A) -> Result<Self, Error> {
        Ok(Self {
            tree: RbTree::try_new_in(alloc)?,
        })
    }
}

impl<T, C, A: Allocator> Set<T, C, A> {
    /// Creates an empty set ordered by `comp` that allocates from `alloc`.
    #[must_use]
    pub fn with_comparator_in(comp: C, alloc: A) -> Self {
        Self {
            tree: RbTree::with_comparator_in(comp, alloc),
        }
    }

    /// Creates an empty set ordered by `comp` that allocates from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if the initial allocation fails.
    pub fn try_with_comparator_in(comp: C, alloc: A) -> Result<Self, Error> {
        Ok(Self {
            tree: RbTree::try_with_comparator_in(comp, alloc)?,
        })
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of elements any set can hold.
    pub fn max_len(&self) -> usize {
        self.tree.max_len()
    }

    /// Removes all elements, keeping the allocated node storage.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of `self` and `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns a reference to the comparator.
    pub fn key_comp(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns a reference to the comparator. Elements are their own keys, so this is
    /// the same as [`Set::key_comp`].
    pub fn value_comp(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns a reference to the underlying allocator.
    pub fn allocator(&self) -> &A {
        self.tree.allocator()
    }

    /// Gets an iterator over the elements of the set, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Returns the smallest element.
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the largest element.
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Retains only the elements for which `f` returns `true`, visiting them in
    /// ascending order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.tree.retain(|value| f(value));
    }
}

impl<T, C, A> Set<T, C, A>
where
    C: Compare<T>,
    A: Allocator,
{
    /// Adds `value` to the set if no equal element is present.
    ///
    /// Returns `true` if the value was inserted, otherwise `value` is dropped and the
    /// set is unchanged.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value).1
    }

    /// Adds `value` to the set if no equal element is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if allocating the new element fails, the set is
    /// left unchanged in that case.
    pub fn try_insert(&mut self, value: T) -> Result<bool, Error> {
        Ok(self.tree.try_insert(value)?.1)
    }

    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// The value may be any borrowed form of the element type, but the ordering on the
    /// borrowed form *must* match the ordering on the element type.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(value)
    }

    /// Returns the number of elements equal to `value`, which is zero or one.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.contains(value))
    }

    /// Returns a reference to the stored element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(value)
    }

    /// Removes the element equal to `value`, returning whether one was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase(value) == 1
    }

    /// Removes and returns the element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.remove(value)
    }

    /// Removes the element equal to `value`, returning the number of elements removed
    /// (zero or one).
    pub fn erase<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase(value)
    }

    /// Removes every element that lies within `range`, returning the number of
    /// elements removed.
    pub fn erase_range<Q, R>(&mut self, range: R) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        self.tree.erase_range(range)
    }

    /// Returns a cursor at the first element not ordered before `value`.
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T, C, A>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            inner: self.tree.lower_bound(value),
        }
    }

    /// Returns a cursor at the first element ordered after `value`.
    pub fn upper_bound<Q>(&self, value: &Q) -> Cursor<'_, T, C, A>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            inner: self.tree.upper_bound(value),
        }
    }

    /// Returns the cursors `(lower_bound(value), upper_bound(value))`, which delimit
    /// the element equal to `value` if there is one.
    pub fn equal_range<Q>(&self, value: &Q) -> (Cursor<'_, T, C, A>, Cursor<'_, T, C, A>)
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        (self.lower_bound(value), self.upper_bound(value))
    }

    /// Returns a deep copy of the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if allocating the copy fails.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        T: Clone,
        C: Clone,
        A: Clone,
    {
        Ok(Self {
            tree: self.tree.try_clone()?,
        })
    }
}

impl<T, C, A> Clone for Set<T, C, A>
where
    T: Clone,
    C: Compare<T> + Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T, C: Default, A: Allocator + Default> Default for Set<T, C, A> {
    fn default() -> Self {
        Self {
            tree: RbTree::default(),
        }
    }
}

impl<T: fmt::Debug, C, A: Allocator> fmt::Debug for Set<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C, A: Allocator> PartialEq for Set<T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C, A: Allocator> Eq for Set<T, C, A> {}

impl<T: PartialOrd, C, A: Allocator> PartialOrd for Set<T, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord, C, A: Allocator> Ord for Set<T, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<T, C, A> Extend<T> for Set<T, C, A>
where
    C: Compare<T>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, T, C, A> Extend<&'a T> for Set<T, C, A>
where
    T: Copy + 'a,
    C: Compare<T>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.tree.extend(iter.into_iter().copied());
    }
}

impl<T, C> FromIterator<T> for Set<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tree: RbTree::from_iter(iter),
        }
    }
}

impl<T, C, A: Allocator> IntoIterator for Set<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C, A: Allocator> IntoIterator for &'a Set<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A position in a [`Set`], either at an element or at the end.
///
/// Created by [`Set::lower_bound`], [`Set::upper_bound`] and [`Set::equal_range`].
pub struct Cursor<'a, T, C, A: Allocator> {
    inner: rbtree::Cursor<'a, T, Identity, C, A>,
}

impl<T, C, A: Allocator> Clone for Cursor<'_, T, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C, A: Allocator> Copy for Cursor<'_, T, C, A> {}

impl<T, C, A: Allocator> PartialEq for Cursor<'_, T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T, C, A: Allocator> Eq for Cursor<'_, T, C, A> {}

impl<T: fmt::Debug, C, A: Allocator> fmt::Debug for Cursor<'_, T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, T, C, A: Allocator> Cursor<'a, T, C, A> {
    /// Returns the element under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        self.inner.get()
    }

    /// Returns `true` if the cursor is at the end.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Moves to the next element. Moving forward from the end wraps to the first
    /// element.
    pub fn move_next(&mut self) {
        self.inner.move_next();
    }

    /// Moves to the previous element. Moving backward from the end wraps to the last
    /// element.
    pub fn move_prev(&mut self) {
        self.inner.move_prev();
    }

    /// Returns the element [`Cursor::move_next`] would move to.
    pub fn peek_next(&self) -> Option<&'a T> {
        self.inner.peek_next()
    }

    /// Returns the element [`Cursor::move_prev`] would move to.
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.inner.peek_prev()
    }
}

// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! An ordered map over a red-black tree.

use alloc::alloc::Global;
use core::alloc::Allocator;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Index, RangeBounds};
use core::{fmt, mem};

use rbtree::{Compare, First, Less, RbTree};

use crate::Error;

/// An ordered map from unique keys of type `K` to values of type `V`.
///
/// Entries are kept sorted by key under the comparator `C` ([`Less`] by default) and
/// stored as `(K, V)` pairs in an [`RbTree`] whose nodes are allocated from `A`.
///
/// Unlike [`BTreeMap::insert`](alloc::collections::BTreeMap::insert), [`Map::insert`]
/// never overwrites an existing value; use [`Map::insert_or_assign`] for that.
pub struct Map<K, V, C = Less, A: Allocator = Global> {
    tree: RbTree<(K, V), First, C, A>,
}

impl<K, V> Map<K, V> {
    /// Creates an empty map ordered by [`Less`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    /// Creates an empty map ordered by [`Less`].
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

impl<K, V, C> Map<K, V, C> {
    /// Creates an empty map ordered by `comp`.
    #[must_use]
    pub fn with_comparator(comp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comp),
        }
    }
}

impl<K, V, A: Allocator> Map<K, V, Less, A> {
    /// Creates an empty map ordered by [`Less`] that allocates from `alloc`.
    #[must_use]
    pub fn new_in(alloc: A) -> Self {
        Self {
            tree: RbTree::new_in(alloc),
        }
    }

    /// Creates an empty map ordered by [`Less`] that allocates from `alloc`.
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

impl<K, V, C, A: Allocator> Map<K, V, C, A> {
    /// Creates an empty map ordered by `comp` that allocates from `alloc`.
    #[must_use]
    pub fn with_comparator_in(comp: C, alloc: A) -> Self {
        Self {
            tree: RbTree::with_comparator_in(comp, alloc),
        }
    }

    /// Creates an empty map ordered by `comp` that allocates from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if the initial allocation fails.
    pub fn try_with_comparator_in(comp: C, alloc: A) -> Result<Self, Error> {
        Ok(Self {
            tree: RbTree::try_with_comparator_in(comp, alloc)?,
        })
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of entries any map can hold.
    pub fn max_len(&self) -> usize {
        self.tree.max_len()
    }

    /// Removes all entries, keeping the allocated node storage.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of `self` and `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns a reference to the key comparator.
    pub fn key_comp(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns a comparator ordering `(K, V)` entries by their keys.
    pub fn value_comp(&self) -> ValueCompare<'_, K, C> {
        ValueCompare {
            comp: self.tree.comparator(),
            _key: PhantomData,
        }
    }

    /// Returns a reference to the underlying allocator.
    pub fn allocator(&self) -> &A {
        self.tree.allocator()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.tree.iter_mut(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Retains only the entries for which `f` returns `true`, visiting them in
    /// ascending key order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.tree.retain(|(k, v)| f(k, v));
    }
}

impl<K, V, C, A> Map<K, V, C, A>
where
    C: Compare<K>,
    A: Allocator,
{
    /// Inserts `value` under `key` if the key is absent.
    ///
    /// Returns `true` if the entry was inserted. An existing entry is left untouched
    /// and `key` and `value` are dropped.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert((key, value)).1
    }

    /// Inserts `value` under `key` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if allocating the new entry fails, the map is left
    /// unchanged in that case.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, Error> {
        Ok(self.tree.try_insert((key, value))?.1)
    }

    /// Inserts `value` under `key`, replacing and returning the previous value if the
    /// key was present.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        if let Some((_, old)) = self.tree.get_mut(&key) {
            return Some(mem::replace(old, value));
        }
        self.tree.insert((key, value));
        None
    }

    /// Inserts `value` under `key`, replacing and returning the previous value if the
    /// key was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if allocating the new entry fails, the map is left
    /// unchanged in that case.
    pub fn try_insert_or_assign(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        if let Some((_, old)) = self.tree.get_mut(&key) {
            return Ok(Some(mem::replace(old, value)));
        }
        self.tree.try_insert((key, value))?;
        Ok(None)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get_mut(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(key).map(|(k, v)| (k, v))
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the key is absent.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.get(key).ok_or(Error::OutOfRange)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the key is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.get_mut(key).ok_or(Error::OutOfRange)
    }

    /// Returns `true` if the map contains an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns the number of entries stored under `key`, which is zero or one.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Returns a mutable reference to the value under `key`, inserting the result of
    /// `f` first if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        &mut self.tree.get_or_insert_with(key, |key| (key, f())).1
    }

    /// Returns a mutable reference to the value under `key`, inserting the result of
    /// `f` first if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if allocating the new entry fails, the map is left
    /// unchanged in that case.
    pub fn try_get_or_insert_with<F>(&mut self, key: K, f: F) -> Result<&mut V, Error>
    where
        F: FnOnce() -> V,
    {
        let entry = self.tree.try_get_or_insert_with(key, |key| (key, f()))?;
        Ok(&mut entry.1)
    }

    /// Returns a mutable reference to the value under `key`, inserting `V::default()`
    /// first if the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.remove(key).map(|(_, v)| v)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.remove(key)
    }

    /// Removes the entry for `key`, returning the number of entries removed (zero or
    /// one).
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase(key)
    }

    /// Removes every entry whose key lies within `range`, returning the number of
    /// entries removed.
    pub fn erase_range<Q, R>(&mut self, range: R) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        self.tree.erase_range(range)
    }

    /// Returns a cursor at the first entry whose key is not ordered before `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V, C, A>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            inner: self.tree.lower_bound(key),
        }
    }

    /// Returns a cursor at the first entry whose key is ordered after `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V, C, A>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor {
            inner: self.tree.upper_bound(key),
        }
    }

    /// Returns the cursors `(lower_bound(key), upper_bound(key))`, which delimit the
    /// entry for `key` if there is one.
    pub fn equal_range<Q>(&self, key: &Q) -> (Cursor<'_, K, V, C, A>, Cursor<'_, K, V, C, A>)
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns a deep copy of the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if allocating the copy fails.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        K: Clone,
        V: Clone,
        C: Clone,
        A: Clone,
    {
        Ok(Self {
            tree: self.tree.try_clone()?,
        })
    }
}

impl<K, V, C, A> Clone for Map<K, V, C, A>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C: Default, A: Allocator + Default> Default for Map<K, V, C, A> {
    fn default() -> Self {
        Self {
            tree: RbTree::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, A: Allocator> fmt::Debug for Map<K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C, A: Allocator> PartialEq for Map<K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C, A: Allocator> Eq for Map<K, V, C, A> {}

impl<K: PartialOrd, V: PartialOrd, C, A: Allocator> PartialOrd for Map<K, V, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C, A: Allocator> Ord for Map<K, V, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K, V, C, A, Q> Index<&Q> for Map<K, V, C, A>
where
    K: Borrow<Q>,
    C: Compare<K> + Compare<Q>,
    A: Allocator,
    Q: ?Sized,
{
    type Output = V;

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Entries whose key is already present are skipped, the first occurrence wins.
impl<K, V, C, A> Extend<(K, V)> for Map<K, V, C, A>
where
    C: Compare<K>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K, V, C> FromIterator<(K, V)> for Map<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: RbTree::from_iter(iter),
        }
    }
}

impl<K, V, C, A: Allocator> IntoIterator for Map<K, V, C, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V, C, A: Allocator> IntoIterator for &'a Map<K, V, C, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C, A: Allocator> IntoIterator for &'a mut Map<K, V, C, A> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Orders `(K, V)` entries by their keys, created by [`Map::value_comp`].
pub struct ValueCompare<'a, K, C> {
    comp: &'a C,
    _key: PhantomData<fn(&K)>,
}

impl<K, V, C: Compare<K>> Compare<(K, V)> for ValueCompare<'_, K, C> {
    fn less(&self, a: &(K, V), b: &(K, V)) -> bool {
        self.comp.less(&a.0, &b.0)
    }
}

/// A position in a [`Map`], either at an entry or at the end.
///
/// Created by [`Map::lower_bound`], [`Map::upper_bound`] and [`Map::equal_range`].
pub struct Cursor<'a, K, V, C, A: Allocator> {
    inner: rbtree::Cursor<'a, (K, V), First, C, A>,
}

impl<K, V, C, A: Allocator> Clone for Cursor<'_, K, V, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C, A: Allocator> Copy for Cursor<'_, K, V, C, A> {}

impl<K, V, C, A: Allocator> PartialEq for Cursor<'_, K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V, C, A: Allocator> Eq for Cursor<'_, K, V, C, A> {}

impl<K: fmt::Debug, V: fmt::Debug, C, A: Allocator> fmt::Debug for Cursor<'_, K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

impl<'a, K, V, C, A: Allocator> Cursor<'a, K, V, C, A> {
    /// Returns the entry under the cursor, or `None` at the end.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.inner.get().map(|(k, v)| (k, v))
    }

    /// Returns the key under the cursor, or `None` at the end.
    pub fn key(&self) -> Option<&'a K> {
        self.inner.get().map(|(k, _)| k)
    }

    /// Returns the value under the cursor, or `None` at the end.
    pub fn value(&self) -> Option<&'a V> {
        self.inner.get().map(|(_, v)| v)
    }

    /// Returns `true` if the cursor is at the end.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Moves to the next entry. Moving forward from the end wraps to the first entry.
    pub fn move_next(&mut self) {
        self.inner.move_next();
    }

    /// Moves to the previous entry. Moving backward from the end wraps to the last entry.
    pub fn move_prev(&mut self) {
        self.inner.move_prev();
    }

    /// Returns the entry [`Cursor::move_next`] would move to.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        self.inner.peek_next().map(|(k, v)| (k, v))
    }

    /// Returns the entry [`Cursor::move_prev`] would move to.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        self.inner.peek_prev().map(|(k, v)| (k, v))
    }
}

/// An iterator over the entries of a [`Map`], sorted by key.
pub struct Iter<'a, K, V> {
    inner: rbtree::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`Map`], sorted by key.
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    inner: rbtree::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`Map`], sorted by key.
pub struct IntoIter<K, V, C, A: Allocator> {
    inner: rbtree::IntoIter<(K, V), First, C, A>,
}

impl<K: fmt::Debug, V: fmt::Debug, C, A: Allocator> fmt::Debug for IntoIter<K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<K, V, C, A: Allocator> Iterator for IntoIter<K, V, C, A> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, A: Allocator> DoubleEndedIterator for IntoIter<K, V, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V, C, A: Allocator> ExactSizeIterator for IntoIter<K, V, C, A> {}
impl<K, V, C, A: Allocator> FusedIterator for IntoIter<K, V, C, A> {}

/// An iterator over the keys of a [`Map`], in sorted order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`Map`], in order by key.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`Map`], in order by key.
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

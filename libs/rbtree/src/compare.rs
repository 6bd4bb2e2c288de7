// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Ordering predicates and key extraction.
//!
//! An [`RbTree`](crate::RbTree) never compares its elements directly. Instead it
//! extracts a key from every element through a [`KeyOf`] strategy and orders those
//! keys with a [`Compare`] predicate. Sets use [`Identity`] (the element is the key),
//! maps use [`First`] (the key is the first half of a `(K, V)` pair).

/// A strict weak ordering over keys of type `K`.
///
/// Two keys `a` and `b` are considered *equivalent* when neither `less(a, b)` nor
/// `less(b, a)` holds. The tree stores at most one element per equivalence class.
///
/// Any `Fn(&K, &K) -> bool` closure is a `Compare<K>`.
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `a` is ordered strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns `true` if `a` and `b` are equivalent under this ordering.
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders keys ascending through their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Orders keys descending through their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Greater;

impl<K: Ord + ?Sized> Compare<K> for Greater {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a > b
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Extracts the ordering key from a stored element.
pub trait KeyOf<T> {
    /// The key type elements are ordered by.
    type Key: ?Sized;

    /// Returns the key of `value`.
    fn key_of(value: &T) -> &Self::Key;
}

/// The element is its own key.
#[derive(Debug)]
pub enum Identity {}

impl<T> KeyOf<T> for Identity {
    type Key = T;

    #[inline]
    fn key_of(value: &T) -> &T {
        value
    }
}

/// The key is the first field of a `(K, V)` pair.
#[derive(Debug)]
pub enum First {}

impl<K, V> KeyOf<(K, V)> for First {
    type Key = K;

    #[inline]
    fn key_of(value: &(K, V)) -> &K {
        &value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalence() {
        assert!(Less.equivalent(&1, &1));
        assert!(!Less.equivalent(&1, &2));
        assert!(Greater.less(&2, &1));

        // ordering by magnitude treats opposite signs as equivalent
        let by_abs = |a: &i32, b: &i32| a.abs() < b.abs();
        assert!(by_abs.equivalent(&-3, &3));
        assert!(by_abs.less(&1, &-2));
    }

    #[test]
    fn key_extraction() {
        assert_eq!(*Identity::key_of(&7), 7);
        assert_eq!(*First::key_of(&("k", 1)), "k");
    }
}

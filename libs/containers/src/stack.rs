// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A last-in first-out adaptor over any sequence that can grow and shrink at its back.

use alloc::collections::{TryReserveError, VecDeque};
use alloc::vec::Vec;
use core::alloc::Allocator;
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use crate::Error;

/// A sequence that supports insertion and removal at its back.
pub trait BackSequence {
    /// The element type of the sequence.
    type Item;

    /// Appends `item` to the back of the sequence.
    fn push_back(&mut self, item: Self::Item);

    /// Appends `item` to the back of the sequence.
    ///
    /// # Errors
    ///
    /// Returns the reservation error if the sequence could not grow, the sequence is
    /// left unchanged in that case.
    fn try_push_back(&mut self, item: Self::Item) -> Result<(), TryReserveError>;

    /// Removes and returns the element at the back of the sequence.
    fn pop_back(&mut self) -> Option<Self::Item>;

    /// Returns the element at the back of the sequence.
    fn back(&self) -> Option<&Self::Item>;

    /// Returns the element at the back of the sequence.
    fn back_mut(&mut self) -> Option<&mut Self::Item>;

    /// Returns the number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, A: Allocator> BackSequence for Vec<T, A> {
    type Item = T;

    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn try_push_back(&mut self, item: T) -> Result<(), TryReserveError> {
        self.try_reserve(1)?;
        self.push(item);
        Ok(())
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    fn back(&self) -> Option<&T> {
        self.last()
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T, A: Allocator> BackSequence for VecDeque<T, A> {
    type Item = T;

    fn push_back(&mut self, item: T) {
        VecDeque::push_back(self, item);
    }

    fn try_push_back(&mut self, item: T) -> Result<(), TryReserveError> {
        self.try_reserve(1)?;
        VecDeque::push_back(self, item);
        Ok(())
    }

    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }

    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// A last-in first-out stack of `T`, backed by the sequence `S` ([`Vec`] by default).
///
/// Comparisons are those of the backing sequence, so stacks compare
/// lexicographically from the bottom element up.
pub struct Stack<T, S = Vec<T>> {
    seq: S,
    _item: PhantomData<T>,
}

impl<T, S: BackSequence<Item = T> + Default> Stack<T, S> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::from_container(S::default())
    }
}

impl<T, S: BackSequence<Item = T>> Stack<T, S> {
    /// Creates a stack whose elements are those of `seq`, the back of `seq` being the
    /// top of the stack.
    pub fn from_container(seq: S) -> Self {
        Self {
            seq,
            _item: PhantomData,
        }
    }

    /// Pushes `item` onto the stack.
    pub fn push(&mut self, item: T) {
        self.seq.push_back(item);
    }

    /// Pushes `item` onto the stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocError`] if the backing sequence could not grow, the stack
    /// is left unchanged in that case.
    pub fn try_push(&mut self, item: T) -> Result<(), Error> {
        Ok(self.seq.try_push_back(item)?)
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Option<T> {
        self.seq.pop_back()
    }

    /// Returns the top element.
    pub fn top(&self) -> Option<&T> {
        self.seq.back()
    }

    /// Returns the top element.
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.seq.back_mut()
    }

    /// Returns the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Returns `true` if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Returns a reference to the backing sequence.
    pub fn as_inner(&self) -> &S {
        &self.seq
    }

    /// Consumes the stack, returning the backing sequence.
    pub fn into_inner(self) -> S {
        self.seq
    }
}

impl<T, S: BackSequence<Item = T> + Default> Default for Stack<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Clone> Clone for Stack<T, S> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Stack<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stack").field(&self.seq).finish()
    }
}

impl<T, S: PartialEq> PartialEq for Stack<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T, S: Eq> Eq for Stack<T, S> {}

impl<T, S: PartialOrd> PartialOrd for Stack<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.seq.partial_cmp(&other.seq)
    }
}

impl<T, S: Ord> Ord for Stack<T, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seq.cmp(&other.seq)
    }
}

impl<T, S: BackSequence<Item = T>> Extend<T> for Stack<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, S: BackSequence<Item = T> + Default> FromIterator<T> for Stack<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_and_deque_agree() {
        let mut a: Stack<u8> = Stack::new();
        let mut b: Stack<u8, VecDeque<u8>> = Stack::new();
        for i in 0..5 {
            a.push(i);
            b.try_push(i).unwrap();
        }
        while let Some(top) = a.pop() {
            assert_eq!(b.pop(), Some(top));
        }
        assert!(b.is_empty());
    }

    #[test]
    fn top_mut_edits_in_place() {
        let mut stack: Stack<u8> = [1, 2, 3].into_iter().collect();
        *stack.top_mut().unwrap() = 30;
        assert_eq!(stack.into_inner(), vec![1, 2, 30]);
    }
}

// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::alloc::{AllocError, Allocator, Layout};
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use core::{fmt, ptr};

use crate::utils::Side;

/// The color of a node in a [`RbTree`](crate::RbTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Freshly inserted nodes are red.
    Red,
    /// The root and the sentinel are always black.
    Black,
}

/// A reference to a node slot inside a `NodePool`.
///
/// This is encoded as a `u32` index into the pool to save space. Slot zero is
/// reserved for the sentinel, so [`NodeRef::NIL`] doubles as "no child" and as
/// the end-of-sequence position.
///
/// This doesn't have a lifetime, but is logically bound to the `NodePool` that
/// it was allocated from and is only valid for the lifetime of that pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef(u32);

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("NIL")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

impl NodeRef {
    /// The sentinel.
    pub(crate) const NIL: Self = Self(0);

    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Returns the slot index as a `usize`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn parent<T>(self, pool: &NodePool<T>) -> NodeRef {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).parent }
    }
    #[inline]
    pub(crate) fn left<T>(self, pool: &NodePool<T>) -> NodeRef {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).left }
    }
    #[inline]
    pub(crate) fn right<T>(self, pool: &NodePool<T>) -> NodeRef {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).right }
    }
    #[inline]
    pub(crate) fn child<T>(self, side: Side, pool: &NodePool<T>) -> NodeRef {
        match side {
            Side::Left => self.left(pool),
            Side::Right => self.right(pool),
        }
    }
    #[inline]
    pub(crate) fn color<T>(self, pool: &NodePool<T>) -> Color {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).color }
    }
    #[inline]
    pub(crate) fn is_red<T>(self, pool: &NodePool<T>) -> bool {
        self.color(pool) == Color::Red
    }
    #[inline]
    pub(crate) fn is_black<T>(self, pool: &NodePool<T>) -> bool {
        self.color(pool) == Color::Black
    }

    #[inline]
    pub(crate) fn set_parent<T>(self, parent: NodeRef, pool: &mut NodePool<T>) {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).parent = parent };
    }
    #[inline]
    pub(crate) fn set_left<T>(self, left: NodeRef, pool: &mut NodePool<T>) {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).left = left };
    }
    #[inline]
    pub(crate) fn set_right<T>(self, right: NodeRef, pool: &mut NodePool<T>) {
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).right = right };
    }
    #[inline]
    pub(crate) fn set_child<T>(self, side: Side, child: NodeRef, pool: &mut NodePool<T>) {
        match side {
            Side::Left => self.set_left(child, pool),
            Side::Right => self.set_right(child, pool),
        }
    }
    #[inline]
    pub(crate) fn set_color<T>(self, color: Color, pool: &mut NodePool<T>) {
        debug_assert!(
            !(self.is_nil() && color == Color::Red),
            "the sentinel must stay black"
        );
        // Safety: the slot is in bounds and its header is always initialized
        unsafe { (*pool.slot(self).as_ptr()).color = color };
    }

    /// Returns a reference to the payload of this node.
    ///
    /// # Safety
    ///
    /// `self` must be a live (allocated and not yet freed) node of `pool` and must not be
    /// the sentinel.
    #[inline]
    pub(crate) unsafe fn value<T>(self, pool: &NodePool<T>) -> &T {
        debug_assert!(!self.is_nil(), "the sentinel has no payload");
        // Safety: ensured by caller
        unsafe { (*pool.slot(self).as_ptr()).value.assume_init_ref() }
    }

    /// Returns a mutable reference to the payload of this node.
    ///
    /// # Safety
    ///
    /// `self` must be a live (allocated and not yet freed) node of `pool` and must not be
    /// the sentinel.
    #[inline]
    pub(crate) unsafe fn value_mut<T>(self, pool: &mut NodePool<T>) -> &mut T {
        debug_assert!(!self.is_nil(), "the sentinel has no payload");
        // Safety: ensured by caller
        unsafe { (*pool.slot(self).as_ptr()).value.assume_init_mut() }
    }

    /// Returns a raw pointer to the payload of this node.
    ///
    /// The pointer is derived from the pool's allocation, not from a reference, so it
    /// may be turned into disjoint `&mut T`s for distinct nodes that outlive the borrow
    /// of `pool`.
    ///
    /// # Safety
    ///
    /// `self` must be a live (allocated and not yet freed) node of `pool` and must not be
    /// the sentinel.
    #[inline]
    pub(crate) unsafe fn value_ptr<T>(self, pool: &mut NodePool<T>) -> NonNull<T> {
        debug_assert!(!self.is_nil(), "the sentinel has no payload");
        let slot = pool.slot(self);
        // Safety: `slot` is in bounds and points to an initialized `Node`
        unsafe { NonNull::new_unchecked(ptr::addr_of_mut!((*slot.as_ptr()).value).cast::<T>()) }
    }

    /// Drops the payload of this node in place, leaving the slot linked.
    ///
    /// # Safety
    ///
    /// `self` must be a live node of `pool` and must not be the sentinel. The payload
    /// must not be accessed again, and the slot must not be freed with
    /// [`NodePool::free_node`] afterwards (only [`NodePool::clear`] or
    /// [`NodePool::free`] may follow).
    #[inline]
    pub(crate) unsafe fn drop_value<T>(self, pool: &mut NodePool<T>) {
        // Safety: ensured by caller
        unsafe { (*pool.slot(self).as_ptr()).value.assume_init_drop() }
    }
}

/// A vertex in the tree.
///
/// Freed slots keep their `Node` header initialized; they are threaded onto the
/// pool's free list through `left`.
///
/// Link fields are only ever accessed through raw place expressions, never through a
/// `&Node<T>`, so that outstanding `&mut T`s into other payloads stay valid.
pub(crate) struct Node<T> {
    parent: NodeRef,
    left: NodeRef,
    right: NodeRef,
    color: Color,
    value: MaybeUninit<T>,
}

impl<T> Node<T> {
    const fn sentinel() -> Self {
        Self {
            parent: NodeRef::NIL,
            left: NodeRef::NIL,
            right: NodeRef::NIL,
            color: Color::Black,
            value: MaybeUninit::uninit(),
        }
    }
}

/// An arena of tree nodes obtained from an [`Allocator`].
///
/// All nodes live in a single allocation that grows by doubling. Slot zero always
/// holds the sentinel once the pool is initialized.
pub(crate) struct NodePool<T> {
    /// Base of the allocation.
    ptr: NonNull<Node<T>>,

    /// Number of slots in the allocation.
    capacity: u32,

    /// Number of slots handed out so far, including the sentinel and freed slots.
    len: u32,

    /// Linked list of freed slots, terminated by `NodeRef::NIL`.
    free_list: NodeRef,

    _type: PhantomData<T>,
}

impl<T> NodePool<T> {
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            len: 0,
            free_list: NodeRef::NIL,
            _type: PhantomData,
        }
    }

    /// Performs the initial allocation and writes the sentinel into slot zero.
    ///
    /// # Safety
    ///
    /// This pool must always be used with the same allocator.
    pub(crate) unsafe fn init(&mut self, allocator: &impl Allocator) -> Result<(), AllocError> {
        debug_assert_eq!(self.capacity, 0, "pool is already initialized");
        self.grow(allocator)?;
        self.reset();
        Ok(())
    }

    /// Frees all `NodeRef`s allocated from this pool, keeping only the sentinel.
    ///
    /// Payloads are **not** dropped, callers must take care of that first.
    pub(crate) fn clear(&mut self) {
        if self.capacity > 0 {
            self.reset();
        }
    }

    fn reset(&mut self) {
        // Safety: an initialized pool always has room for the sentinel
        unsafe { self.ptr.write(Node::sentinel()) };
        self.len = 1;
        self.free_list = NodeRef::NIL;
    }

    #[inline]
    fn grow(&mut self, allocator: &impl Allocator) -> Result<(), AllocError> {
        if self.capacity == 0 {
            // Allocate space for the sentinel and one node for the initial allocation.
            let new_layout =
                Layout::array::<Node<T>>(2).expect("exceeded rbtree maximum allocation size");

            self.ptr = allocator.allocate(new_layout)?.cast();
            self.capacity = 2;
        } else {
            let new_capacity = self.capacity.saturating_mul(2);
            assert!(
                new_capacity > self.capacity,
                "exceeded rbtree maximum node count"
            );

            // Safety: this is the layout the current allocation was made with
            let old_layout = unsafe {
                Layout::from_size_align_unchecked(
                    size_of::<Node<T>>() * self.capacity as usize,
                    align_of::<Node<T>>(),
                )
            };
            let new_layout = Layout::array::<Node<T>>(new_capacity as usize)
                .expect("exceeded rbtree maximum allocation size");

            tracing::trace!(
                "node pool full at {} slots, growing to {new_capacity}",
                self.capacity
            );

            // Safety: `ptr` was allocated by `allocator` with `old_layout`, which is smaller
            self.ptr = unsafe { allocator.grow(self.ptr.cast(), old_layout, new_layout)?.cast() };
            self.capacity = new_capacity;
        }

        Ok(())
    }

    /// Moves `value` into a fresh node with both children and the parent set to the
    /// sentinel.
    ///
    /// Slots on the free list are reused before the allocation grows. When growing
    /// fails, `value` is dropped and the pool is left unchanged.
    ///
    /// # Safety
    ///
    /// This pool must always be used with the same allocator.
    pub(crate) unsafe fn alloc_node(
        &mut self,
        value: T,
        color: Color,
        allocator: &impl Allocator,
    ) -> Result<NodeRef, AllocError> {
        debug_assert!(self.capacity > 0, "pool used before initialization");

        let node = if self.free_list.is_nil() {
            if self.len == self.capacity {
                self.grow(allocator)?;
            }

            // grow() will have doubled the capacity, which guarantees at least enough
            // space for a single node.
            let node = NodeRef(self.len);
            self.len += 1;
            node
        } else {
            // First try re-using a node from the free list.
            let node = self.free_list;
            self.free_list = node.left(self);
            node
        };

        let slot = self.slot(node);
        // Safety: `node` is in bounds and the slot holds no live payload
        unsafe {
            slot.write(Node {
                parent: NodeRef::NIL,
                left: NodeRef::NIL,
                right: NodeRef::NIL,
                color,
                value: MaybeUninit::new(value),
            });
        }

        Ok(node)
    }

    /// Moves the payload out of `node` and returns its slot to the free list.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this pool. It must be unlinked from the tree and
    /// must not be used again until it is handed out by [`NodePool::alloc_node`].
    pub(crate) unsafe fn free_node(&mut self, node: NodeRef) -> T {
        assert!(!node.is_nil(), "attempted to free the sentinel");

        // Safety: ensured by caller
        let value = unsafe { (*self.slot(node).as_ptr()).value.assume_init_read() };

        node.set_parent(NodeRef::NIL, self);
        node.set_left(self.free_list, self);
        node.set_right(NodeRef::NIL, self);
        node.set_color(Color::Black, self);
        self.free_list = node;

        value
    }

    /// Exchanges the payloads of two distinct nodes, leaving their links untouched.
    ///
    /// # Safety
    ///
    /// Both nodes must be live nodes of this pool.
    pub(crate) unsafe fn swap_values(&mut self, a: NodeRef, b: NodeRef) {
        debug_assert_ne!(a, b);
        debug_assert!(!a.is_nil() && !b.is_nil(), "the sentinel has no payload");
        let a = self.slot(a);
        let b = self.slot(b);
        // Safety: both slots are in bounds and distinct
        unsafe {
            ptr::swap_nonoverlapping(
                ptr::addr_of_mut!((*a.as_ptr()).value),
                ptr::addr_of_mut!((*b.as_ptr()).value),
                1,
            );
        }
    }

    /// Releases the pool's allocation. This invalidates all `NodeRef`s allocated from
    /// this pool, including the sentinel.
    ///
    /// Payloads are **not** dropped, callers must take care of that first.
    ///
    /// # Safety
    ///
    /// This pool must always be used with the same allocator.
    pub(crate) unsafe fn free(&mut self, allocator: &impl Allocator) {
        if self.capacity == 0 {
            return;
        }

        // Safety: this is the layout the current allocation was made with
        unsafe {
            let layout = Layout::from_size_align_unchecked(
                size_of::<Node<T>>() * self.capacity as usize,
                align_of::<Node<T>>(),
            );
            allocator.deallocate(self.ptr.cast(), layout);
        }

        self.ptr = NonNull::dangling();
        self.capacity = 0;
        self.len = 0;
        self.free_list = NodeRef::NIL;
    }

    #[inline]
    fn slot(&self, node: NodeRef) -> NonNull<Node<T>> {
        debug_assert!(
            node.0 < self.len,
            "node {node:?} was not allocated from this pool"
        );
        // Safety: `NodeRef`s are only handed out below `len`, which never exceeds `capacity`
        unsafe { self.ptr.add(node.index()) }
    }
}

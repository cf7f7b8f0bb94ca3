//! A growable circular buffer used as `Channel<T>`'s backing store.
//!
//! `Queue<T>` is a single-owner FIFO: all concurrency is supplied externally
//! by whoever holds it (in this crate, `Channel<T>` behind its own mutex).
//! Capacity doubles when full and halves when sparsely occupied, but never
//! drops below [`Queue::INITIAL_CAPACITY`].

use crate::error::ContractViolation;
use crate::invariants::{debug_assert_bounded_len, debug_assert_capacity_floor};

/// A growable FIFO ring buffer.
///
/// `put` and `get` are amortized O(1): growth doubles capacity and copies the
/// live range into a fresh buffer starting at index 0; shrink does the same
/// at half (or the initial) capacity once occupancy drops below a quarter.
pub struct Queue<T> {
    buf: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> Queue<T> {
    /// Initial (and minimum) capacity of a freshly created queue.
    pub const INITIAL_CAPACITY: usize = 512;

    /// Creates a new, empty queue at [`Queue::INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self {
            buf: (0..Self::INITIAL_CAPACITY).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Number of live items currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Current backing capacity (always `>= INITIAL_CAPACITY`).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// True iff no items are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn tail(&self) -> usize {
        (self.head + self.len) % self.capacity()
    }

    /// Appends `x` to the back of the queue, growing the backing buffer first
    /// if it is full.
    pub fn put(&mut self, x: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        let tail = self.tail();
        self.buf[tail] = Some(x);
        self.len += 1;
        debug_assert_bounded_len!(self.len, self.capacity());
    }

    /// Removes and returns the item at the front of the queue.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty; callers must check [`Queue::is_empty`]
    /// (or track length externally) before calling.
    pub fn get(&mut self) -> T {
        if self.is_empty() {
            panic!("{}", ContractViolation::PopEmptyQueue);
        }
        let head = self.head;
        let x = self.buf[head].take().expect("slot at head must be occupied");
        self.head = (head + 1) % self.capacity();
        self.len -= 1;
        self.maybe_shrink();
        x
    }

    fn grow(&mut self) {
        let old_cap = self.capacity();
        let new_cap = old_cap * 2;
        self.relocate(new_cap);
        debug_assert_capacity_floor!(self.capacity(), Self::INITIAL_CAPACITY);
    }

    fn maybe_shrink(&mut self) {
        let cap = self.capacity();
        if cap > Self::INITIAL_CAPACITY && self.len < cap / 4 {
            let new_cap = (cap / 2).max(Self::INITIAL_CAPACITY);
            self.relocate(new_cap);
        }
        debug_assert_capacity_floor!(self.capacity(), Self::INITIAL_CAPACITY);
    }

    /// Re-linearizes the logical `[head, .., tail)` run into a fresh buffer
    /// of `new_cap` slots, starting at index 0. Handles both the wrapped
    /// (`head > tail`) and linear (`head <= tail`) layouts.
    fn relocate(&mut self, new_cap: usize) {
        let mut new_buf: Box<[Option<T>]> = (0..new_cap).map(|_| None).collect();
        let old_cap = self.capacity();
        for i in 0..self.len {
            let src = (self.head + i) % old_cap;
            new_buf[i] = self.buf[src].take();
        }
        self.buf = new_buf;
        self.head = 0;
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order() {
        let mut q = Queue::new();
        for i in 0..10 {
            q.put(i);
        }
        for i in 0..10 {
            assert_eq!(q.get(), i);
        }
        assert!(q.is_empty());
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut q = Queue::new();
        for i in 0..(Queue::<u64>::INITIAL_CAPACITY + 1) {
            q.put(i as u64);
        }
        assert_eq!(q.capacity(), Queue::<u64>::INITIAL_CAPACITY * 2);
        assert_eq!(q.len(), Queue::<u64>::INITIAL_CAPACITY + 1);
        for i in 0..(Queue::<u64>::INITIAL_CAPACITY + 1) {
            assert_eq!(q.get(), i as u64);
        }
    }

    #[test]
    fn grow_then_wrap_preserves_order() {
        let mut q = Queue::new();
        // Fill, drain half, refill so head/tail wrap before a grow.
        for i in 0..Queue::<u32>::INITIAL_CAPACITY {
            q.put(i as u32);
        }
        for _ in 0..(Queue::<u32>::INITIAL_CAPACITY / 2) {
            q.get();
        }
        for i in 0..(Queue::<u32>::INITIAL_CAPACITY / 2 + 10) {
            q.put(1_000_000 + i as u32);
        }
        let mut out = Vec::new();
        while !q.is_empty() {
            out.push(q.get());
        }
        let mut expected: Vec<u32> = ((Queue::<u32>::INITIAL_CAPACITY / 2)
            ..Queue::<u32>::INITIAL_CAPACITY)
            .map(|i| i as u32)
            .collect();
        expected.extend((0..(Queue::<u32>::INITIAL_CAPACITY / 2 + 10)).map(|i| 1_000_000 + i as u32));
        assert_eq!(out, expected);
    }

    #[test]
    fn shrinks_but_never_below_initial() {
        let mut q = Queue::new();
        for i in 0..(Queue::<u64>::INITIAL_CAPACITY * 2) {
            q.put(i as u64);
        }
        assert!(q.capacity() >= Queue::<u64>::INITIAL_CAPACITY * 2);
        for _ in 0..(Queue::<u64>::INITIAL_CAPACITY * 2 - 1) {
            q.get();
        }
        assert_eq!(q.len(), 1);
        assert!(q.capacity() >= Queue::<u64>::INITIAL_CAPACITY);
        q.get();
        assert!(q.is_empty());
        assert_eq!(q.capacity(), Queue::<u64>::INITIAL_CAPACITY);
    }

    #[test]
    #[should_panic(expected = "get on an empty queue")]
    fn get_on_empty_panics() {
        let mut q: Queue<u32> = Queue::new();
        q.get();
    }

    #[test]
    fn supports_null_payload() {
        let mut q: Queue<Option<u32>> = Queue::new();
        q.put(None);
        q.put(Some(5));
        assert_eq!(q.get(), None);
        assert_eq!(q.get(), Some(5));
    }
}

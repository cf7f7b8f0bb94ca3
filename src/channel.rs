//! An unbounded, thread-safe, closable multi-producer/multi-consumer channel.

use crate::error::ContractViolation;
use crate::invariants::debug_assert_closed_sticky;
use crate::queue::Queue;
use crate::select::SelectSession;
use std::sync::{Arc, Condvar, Mutex};

struct State<T> {
    queue: Queue<T>,
    closed: bool,
}

struct Inner<T> {
    state: Mutex<State<T>>,
    cvar: Condvar,
}

/// An unbounded FIFO channel, cheaply cloneable, shared by any number of
/// producers and consumers.
///
/// Cloning a `Channel` yields another handle to the same underlying queue
/// (reference-counted internally), the same way the teacher library's
/// `Channel<T>` hands out cheap `Arc`-backed clones.
pub struct Channel<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Channel<T> {
    /// Creates a new, open, empty channel.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    queue: Queue::new(),
                    closed: false,
                }),
                cvar: Condvar::new(),
            }),
        }
    }

    /// Enqueues `x`, waking any blocked receiver.
    ///
    /// # Panics
    ///
    /// Panics if the channel has already been [`Channel::close`]d.
    pub fn send(&self, x: T) {
        let mut guard = self.inner.state.lock().unwrap();
        if guard.closed {
            panic!("{}", ContractViolation::SendAfterClose);
        }
        guard.queue.put(x);
        // notify_all (not notify_one): a parked select helper that is about
        // to lose its arbitration must still wake up and re-check.
        self.inner.cvar.notify_all();
    }

    /// Blocking receive: waits until a value is available or the channel is
    /// closed and drained, whichever comes first.
    ///
    /// Returns `Some(value)` for a live value, or `None` once the channel is
    /// closed and empty (end of stream).
    pub fn recv(&self) -> Option<T> {
        let mut guard = self.inner.state.lock().unwrap();
        loop {
            if !guard.queue.is_empty() {
                return Some(guard.queue.get());
            }
            if guard.closed {
                return None;
            }
            guard = self.inner.cvar.wait(guard).unwrap();
        }
    }

    /// Non-blocking receive: returns `Some(value)` if one was immediately
    /// available, `None` otherwise.
    ///
    /// Does not distinguish an empty-but-open channel from an empty-and-closed
    /// one; callers who need that distinction use [`Channel::recv`].
    pub fn try_recv(&self) -> Option<T> {
        let mut guard = self.inner.state.lock().unwrap();
        if guard.queue.is_empty() {
            None
        } else {
            Some(guard.queue.get())
        }
    }

    /// A snapshot of the number of items currently queued. Stale the instant
    /// it is returned under concurrent use.
    pub fn len(&self) -> usize {
        self.inner.state.lock().unwrap().queue.len()
    }

    /// True iff the channel currently has no queued items (a stale snapshot,
    /// like [`Channel::len`]).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closes the channel: forbids further sends and wakes all blocked
    /// receivers. Already-enqueued values remain receivable until drained.
    ///
    /// # Panics
    ///
    /// Panics if the channel was already closed.
    pub fn close(&self) {
        let mut guard = self.inner.state.lock().unwrap();
        let was_closed = guard.closed;
        if was_closed {
            panic!("{}", ContractViolation::DoubleClose);
        }
        guard.closed = true;
        debug_assert_closed_sticky!(was_closed, guard.closed);
        self.inner.cvar.notify_all();
    }

    /// True iff [`Channel::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().unwrap().closed
    }

    /// Wakes every thread currently parked on this channel's condvar without
    /// changing any state. Used by `select`'s winning helper to rouse the
    /// losing helpers on other channels so they can re-check the session and
    /// back out.
    pub(crate) fn wake_all(&self) {
        let _guard = self.inner.state.lock().unwrap();
        self.inner.cvar.notify_all();
    }

    /// Session-aware blocking receive used by `select`'s Phase B helpers.
    ///
    /// Returns `None` if this helper lost the arbitration to a *different*
    /// index — in which case nothing was popped from the queue. Returns
    /// `Some(value)` if this helper won and completed the receive, where
    /// `value` is `None` for closed-and-drained.
    ///
    /// A helper that claims the winner slot but then loses the value itself
    /// (a concurrent ordinary `recv`/`try_recv` drains it first — legal MPMC
    /// usage) keeps its claim and loops back to wait on this channel again,
    /// rather than reporting a loss: the slot is pinned to this `idx` for the
    /// rest of the session, so only this call can ever produce the result.
    pub(crate) fn recv_for_select(&self, session: &SelectSession, idx: usize) -> Option<Option<T>> {
        loop {
            let mut guard = self.inner.state.lock().unwrap();
            loop {
                if session.winner().is_some_and(|w| w != idx) {
                    return None;
                }
                if !guard.queue.is_empty() || guard.closed {
                    break;
                }
                guard = self.inner.cvar.wait(guard).unwrap();
            }
            if session.winner().is_some_and(|w| w != idx) {
                return None;
            }
            drop(guard);

            if !session.try_claim(idx) {
                // A different index claimed the slot first; we lost.
                return None;
            }

            // Won (or already held) the claim. Re-acquire the channel mutex
            // (never held alongside the session mutex) and complete the
            // receive.
            let mut guard = self.inner.state.lock().unwrap();
            if !guard.queue.is_empty() {
                return Some(Some(guard.queue.get()));
            }
            if guard.closed {
                return Some(None);
            }
            // Another ordinary receiver stole the value between our release
            // of the channel mutex and claiming the session; we already
            // promised to be the winner, so keep waiting on this channel.
            drop(guard);
        }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Drop for Inner<T> {
    /// Implicit close on teardown of the last handle, so the invariant
    /// "destruction always leaves the channel closed" holds even if the
    /// caller never called [`Channel::close`] explicitly. No receiver can
    /// observe this: by definition no other `Channel` handle (and therefore
    /// no other thread that could be blocked in `recv`) exists at this point.
    fn drop(&mut self) {
        if let Ok(mut guard) = self.state.lock() {
            guard.closed = true;
        }
    }
}

// Safety: Channel is Send + Sync as long as T is Send; the mutex is the only
// way to touch the backing queue.
unsafe impl<T: Send> Send for Channel<T> {}
unsafe impl<T: Send> Sync for Channel<T> {}

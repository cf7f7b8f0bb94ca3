//! A reusable integer latch that broadcasts to waiters once its count falls
//! to zero or below.

use crate::error::ContractViolation;
use crate::invariants::debug_assert_quiescence_holds;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Condvar, Mutex};

/// A countdown latch, constructed with a strictly positive initial value.
///
/// `count` is tracked atomically so [`Countdown::get`] and
/// [`Countdown::finished`] never need the mutex; [`Countdown::wait`] still
/// acquires it, to close the standard lost-wakeup window between checking
/// the count and parking on the condvar.
///
/// Over-decrementing is allowed: the count may go negative, and is treated
/// the same as zero ("finished").
pub struct Countdown {
    count: AtomicI64,
    lock: Mutex<()>,
    cvar: Condvar,
}

impl Countdown {
    /// Creates a countdown initialized to `initial`.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not strictly positive.
    pub fn new(initial: i64) -> Self {
        if initial <= 0 {
            panic!("{}", ContractViolation::NonPositiveCountdown(initial));
        }
        Self {
            count: AtomicI64::new(initial),
            lock: Mutex::new(()),
            cvar: Condvar::new(),
        }
    }

    /// Current count. May be negative.
    #[inline]
    pub fn get(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    /// True once the count has reached zero or below.
    #[inline]
    pub fn finished(&self) -> bool {
        self.get() <= 0
    }

    /// Adds `delta` to the count (may be negative), broadcasting to waiters
    /// if the result is `<= 0`.
    pub fn add(&self, delta: i64) {
        let was_finished = self.finished();
        let new = self.count.fetch_add(delta, Ordering::SeqCst) + delta;
        debug_assert_quiescence_holds!(was_finished, new <= 0);
        if new <= 0 {
            self.notify();
        }
    }

    /// Subtracts `delta` from the count; see [`Countdown::add`].
    pub fn sub(&self, delta: i64) {
        self.add(-delta);
    }

    /// Decrements the count by one; see [`Countdown::add`].
    pub fn dec(&self) {
        self.add(-1);
    }

    /// Increments the count by one; see [`Countdown::add`].
    pub fn inc(&self) {
        self.add(1);
    }

    /// Sets the count to `value` directly, broadcasting if `value <= 0`.
    pub fn set(&self, value: i64) {
        self.count.store(value, Ordering::SeqCst);
        if value <= 0 {
            self.notify();
        }
    }

    /// Blocks the calling thread until the count reaches zero or below.
    ///
    /// Returns immediately if the count is already `<= 0`. Tolerates
    /// spurious wakeups by re-checking in a loop.
    pub fn wait(&self) {
        if self.finished() {
            return;
        }
        let guard = self.lock.lock().unwrap();
        let _guard = self
            .cvar
            .wait_while(guard, |_| !self.finished())
            .unwrap();
    }

    fn notify(&self) {
        // The mutex is taken only to serialize with `wait`'s re-check; the
        // count itself is already visible via the atomic store above.
        let _guard = self.lock.lock().unwrap();
        self.cvar.notify_all();
    }
}

impl Drop for Countdown {
    /// Broadcasts one final time so any thread still parked in `wait`
    /// unblocks deterministically as the countdown is torn down.
    fn drop(&mut self) {
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    #[should_panic(expected = "countdown initial value must be positive")]
    fn rejects_non_positive_initial() {
        Countdown::new(0);
    }

    #[test]
    fn wait_returns_immediately_once_finished() {
        let cd = Countdown::new(1);
        cd.dec();
        assert!(cd.finished());
        cd.wait();
        cd.wait();
    }

    #[test]
    fn over_decrement_still_finishes() {
        let cd = Countdown::new(2);
        cd.sub(5);
        assert_eq!(cd.get(), -3);
        assert!(cd.finished());
    }

    #[test]
    fn set_with_non_positive_broadcasts() {
        let cd = Arc::new(Countdown::new(1000));
        let waiter = {
            let cd = Arc::clone(&cd);
            thread::spawn(move || cd.wait())
        };
        cd.set(0);
        waiter.join().unwrap();
    }

    #[test]
    fn many_waiters_all_wake() {
        let cd = Arc::new(Countdown::new(8));
        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let cd = Arc::clone(&cd);
                thread::spawn(move || cd.wait())
            })
            .collect();
        for _ in 0..8 {
            thread::sleep(std::time::Duration::from_millis(1));
            cd.dec();
        }
        for w in waiters {
            w.join().unwrap();
        }
    }
}

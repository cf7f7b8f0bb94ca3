//! Property-based tests for the invariants documented in `SPEC_FULL.md`.
//!
//! Coverage:
//! - `Queue<T>`: capacity bounds, round-trip ordering.
//! - `Countdown`: monotone quiescence.

use proptest::prelude::*;
use ringchan_rs::{Countdown, Queue};

// =============================================================================
// INV-Q-01 / property 7: capacity bounds
// "0 ≤ length ≤ capacity" for any sequence of puts/gets
// =============================================================================

proptest! {
    /// Queue length never exceeds capacity, and capacity never drops below
    /// the initial capacity, across any interleaving of puts and gets.
    #[test]
    fn prop_queue_capacity_bounds(ops in prop::collection::vec(any::<bool>(), 0..500)) {
        let mut q: Queue<u64> = Queue::new();
        let mut expected_len = 0usize;
        for (i, put) in ops.iter().enumerate() {
            if *put || expected_len == 0 {
                q.put(i as u64);
                expected_len += 1;
            } else {
                q.get();
                expected_len -= 1;
            }
            prop_assert_eq!(q.len(), expected_len);
            prop_assert!(q.capacity() >= Queue::<u64>::INITIAL_CAPACITY);
            prop_assert!(q.len() <= q.capacity());
        }
    }

    /// property 2: queue round-trip — putting S then popping |S| items
    /// returns S in order.
    #[test]
    fn prop_queue_round_trip(items in prop::collection::vec(any::<u32>(), 0..300)) {
        let ch = ringchan_rs::Channel::<u32>::new();
        for &x in &items {
            ch.send(x);
        }
        for &expected in &items {
            prop_assert_eq!(ch.try_recv(), Some(expected));
        }
        prop_assert_eq!(ch.try_recv(), None);
    }
}

proptest! {
    /// property 5: countdown monotone quiescence — once count <= 0, `wait`
    /// never blocks again regardless of further decrements.
    #[test]
    fn prop_countdown_monotone_quiescence(initial in 1i64..200, extra_decrements in 0i64..50) {
        let cd = Countdown::new(initial);
        for _ in 0..initial {
            cd.dec();
        }
        prop_assert!(cd.finished());
        cd.wait();
        for _ in 0..extra_decrements {
            cd.dec();
            prop_assert!(cd.finished());
            cd.wait();
        }
    }
}

//! Debug assertion macros for the invariants documented in `SPEC_FULL.md`.
//!
//! These macros are only active in debug builds (`#[cfg(debug_assertions)]`), so
//! there is zero overhead in release builds. Used by `Queue<T>`, `Countdown`,
//! `Channel<T>`, and the `select` helper arbitration.

// =============================================================================
// INV-Q-01: Bounded length
// =============================================================================

/// Assert that a queue's length never exceeds its capacity.
///
/// **Invariant**: `0 ≤ length ≤ capacity`
macro_rules! debug_assert_bounded_len {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "INV-Q-01 violated: len {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// INV-Q-02: Capacity floor
// =============================================================================

/// Assert that a queue's capacity never drops below its initial capacity.
macro_rules! debug_assert_capacity_floor {
    ($capacity:expr, $initial:expr) => {
        debug_assert!(
            $capacity >= $initial,
            "INV-Q-02 violated: capacity {} fell below initial capacity {}",
            $capacity,
            $initial
        )
    };
}

// =============================================================================
// INV-CD-01: Monotone quiescence
// =============================================================================

/// Assert that a countdown which has already reached zero-or-below never
/// reports a positive count afterwards, for any single observed transition.
macro_rules! debug_assert_quiescence_holds {
    ($was_finished:expr, $now_finished:expr) => {
        debug_assert!(
            !$was_finished || $now_finished,
            "INV-CD-01 violated: countdown un-finished itself"
        )
    };
}

// =============================================================================
// INV-CH-01: Closed is sticky
// =============================================================================

/// Assert that a channel observed as closed is never observed open afterwards.
macro_rules! debug_assert_closed_sticky {
    ($was_closed:expr, $now_closed:expr) => {
        debug_assert!(
            !$was_closed || $now_closed,
            "INV-CH-01 violated: a closed channel reopened"
        )
    };
}

// =============================================================================
// INV-SEL-01: At most one winner
// =============================================================================

/// Assert that a select session never records a second winner.
macro_rules! debug_assert_single_winner {
    ($prior_winner:expr) => {
        debug_assert!(
            $prior_winner.is_none(),
            "INV-SEL-01 violated: select session already had a winner"
        )
    };
}

pub(crate) use debug_assert_bounded_len;
pub(crate) use debug_assert_capacity_floor;
pub(crate) use debug_assert_closed_sticky;
pub(crate) use debug_assert_quiescence_holds;
pub(crate) use debug_assert_single_winner;

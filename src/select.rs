//! Multi-way receive-select over a set of candidate channels.

use crate::channel::Channel;
use crate::invariants::debug_assert_single_winner;
use rand::seq::SliceRandom;
use std::sync::Mutex;

/// Transient coordination record for one `select` call's Phase B.
///
/// Guards a single winner slot: whichever helper claims it first proceeds to
/// complete its receive; every other helper, on next wakeup, observes the
/// slot taken and returns without dequeuing anything.
pub(crate) struct SelectSession {
    winner: Mutex<Option<usize>>,
}

impl SelectSession {
    fn new() -> Self {
        Self {
            winner: Mutex::new(None),
        }
    }

    /// The index that has claimed the winner slot, if any.
    pub(crate) fn winner(&self) -> Option<usize> {
        *self.winner.lock().unwrap()
    }

    /// Attempts to claim the winner slot for `idx`. Returns `true` if `idx`
    /// holds the slot afterwards — either because it just claimed it, or
    /// because it already held it from an earlier, value-losing attempt.
    /// Returns `false` if a *different* index holds the slot.
    pub(crate) fn try_claim(&self, idx: usize) -> bool {
        let mut slot = self.winner.lock().unwrap();
        match *slot {
            Some(w) => w == idx,
            None => {
                debug_assert_single_winner!(*slot);
                *slot = Some(idx);
                true
            }
        }
    }
}

/// Blocks until exactly one of `channels` delivers a receive, then returns
/// that channel's index along with the value it delivered (`None` for
/// closed-and-drained).
///
/// Candidates that do not win are left untouched: nothing is dequeued from
/// them by the call, live or closed.
///
/// Phase A opportunistically scans the candidates in random order with a
/// non-blocking receive, so that a channel already holding a value is
/// returned without spawning any helper threads. Phase B, entered only if
/// Phase A found nothing, spawns one scoped helper per candidate to block on
/// that channel, arbitrating cooperatively over which helper's receive
/// actually completes.
///
/// # Panics
///
/// Panics if `channels` is empty.
pub fn select<T: Send>(channels: &[Channel<T>]) -> (usize, Option<T>) {
    assert!(
        !channels.is_empty(),
        "select requires at least one candidate channel"
    );

    let mut order: Vec<usize> = (0..channels.len()).collect();
    order.shuffle(&mut rand::thread_rng());
    for &i in &order {
        if let Some(v) = channels[i].try_recv() {
            return (i, Some(v));
        }
    }

    let session = SelectSession::new();
    let winner: Mutex<Option<(usize, Option<T>)>> = Mutex::new(None);

    crossbeam_utils::thread::scope(|scope| {
        for (i, ch) in channels.iter().enumerate() {
            let session = &session;
            let winner = &winner;
            scope.spawn(move |_| {
                if let Some(value) = ch.recv_for_select(session, i) {
                    *winner.lock().unwrap() = Some((i, value));
                    for (j, other) in channels.iter().enumerate() {
                        if j != i {
                            other.wake_all();
                        }
                    }
                }
            });
        }
    })
    .expect("select helper thread panicked");

    winner
        .into_inner()
        .unwrap()
        .expect("exactly one select helper must win before the scope joins")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn phase_a_prefers_an_already_ready_channel() {
        let channels: Vec<Channel<u32>> = (0..3).map(|_| Channel::new()).collect();
        channels[1].send(42);
        let (idx, value) = select(&channels);
        assert_eq!(idx, 1);
        assert_eq!(value, Some(42));
        assert!(channels[0].try_recv().is_none());
        assert!(channels[2].try_recv().is_none());
    }

    #[test]
    fn phase_b_wakes_on_first_send() {
        let channels: Vec<Channel<u32>> = (0..3).map(|_| Channel::new()).collect();
        thread::scope(|s| {
            for (i, ch) in channels.iter().enumerate() {
                let ch = ch.clone();
                s.spawn(move || {
                    thread::sleep(Duration::from_millis(10 * (3 - i as u64)));
                    ch.send(10 * i as u32);
                });
            }
            let (idx, value) = select(&channels);
            // The channel with the shortest sleep (the highest index here)
            // sends first and should win.
            assert_eq!(idx, 2);
            assert_eq!(value, Some(20));
        });
        // The other two channels still hold their later-sent values.
        assert_eq!(channels[0].try_recv(), Some(0));
        assert_eq!(channels[1].try_recv(), Some(10));
    }

    #[test]
    fn select_over_single_closed_drained_channel_returns_none() {
        let ch: Channel<u32> = Channel::new();
        ch.close();
        let (idx, value) = select(std::slice::from_ref(&ch));
        assert_eq!(idx, 0);
        assert_eq!(value, None);
    }

    #[test]
    #[should_panic(expected = "select requires at least one candidate channel")]
    fn select_over_no_channels_panics() {
        let channels: Vec<Channel<u32>> = Vec::new();
        select(&channels);
    }
}

//! Parallel quicksort over a channel-based work queue.
//!
//! Included purely as a usage demonstration: the reference specification
//! calls this example program "out of scope ... contributes no design", so
//! none of its partitioning logic informed the library above it.
//!
//! Run with: `cargo run --example quicksort`.

use ringchan_rs::{Channel, Countdown};
use std::sync::Arc;
use std::thread;

/// A chunk of the array to sort, identified by its half-open range.
struct Task {
    lo: usize,
    hi: usize,
}

fn partition(data: &mut [i64]) -> usize {
    let pivot = data[data.len() - 1];
    let mut i = 0;
    for j in 0..data.len() - 1 {
        if data[j] <= pivot {
            data.swap(i, j);
            i += 1;
        }
    }
    data.swap(i, data.len() - 1);
    i
}

fn main() {
    const N_WORKERS: usize = 4;
    let mut data: Vec<i64> = (0..10_000).rev().collect();
    let data = Arc::new(std::sync::Mutex::new(std::mem::take(&mut data)));

    let tasks = Channel::new();
    let len = data.lock().unwrap().len();
    tasks.send(Task { lo: 0, hi: len });

    // Outstanding work counter: every task pushed increments it, every task
    // fully processed (leaf or re-split) decrements it. When it reaches
    // zero there is no more work left to do.
    let outstanding = Arc::new(Countdown::new(1));

    let workers: Vec<_> = (0..N_WORKERS)
        .map(|_| {
            let tasks = tasks.clone();
            let data = Arc::clone(&data);
            let outstanding = Arc::clone(&outstanding);
            thread::spawn(move || {
                while !outstanding.finished() {
                    let Some(task) = tasks.try_recv() else {
                        thread::yield_now();
                        continue;
                    };
                    let mut guard = data.lock().unwrap();
                    let slice = &mut guard[task.lo..task.hi];
                    if slice.len() <= 1 {
                        outstanding.dec();
                        continue;
                    }
                    let p = partition(slice);
                    drop(guard);

                    // Each split either spawns two new tasks (net +1) or, for
                    // base cases, finishes outright (net -1); either way the
                    // count always lands back at zero once nothing remains.
                    outstanding.add(1);
                    tasks.send(Task {
                        lo: task.lo,
                        hi: task.lo + p,
                    });
                    tasks.send(Task {
                        lo: task.lo + p + 1,
                        hi: task.hi,
                    });
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }

    let sorted = data.lock().unwrap();
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    println!("sorted {} elements across {} workers", sorted.len(), N_WORKERS);
}

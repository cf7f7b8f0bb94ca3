//! Parallel Fibonacci worker pool, demonstrating `Channel` + `Countdown`
//! together (scenario E3 from `SPEC_FULL.md`).
//!
//! Run with: `cargo run --example fib_workers --features ""` (no special
//! features required).

use ringchan_rs::{Channel, Countdown};
use std::sync::Arc;
use std::thread;

fn fib(n: u64) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}

fn main() {
    const N_WORKERS: usize = 10;
    const N_TASKS: usize = 10;

    let tasks = Channel::new();
    for _ in 0..N_TASKS {
        tasks.send(37u64);
    }
    tasks.close();

    let results = Channel::new();
    let remaining = Arc::new(Countdown::new(N_WORKERS as i64));

    let workers: Vec<_> = (0..N_WORKERS)
        .map(|_| {
            let tasks = tasks.clone();
            let results = results.clone();
            let remaining = Arc::clone(&remaining);
            thread::spawn(move || {
                while let Some(n) = tasks.recv() {
                    results.send(fib(n));
                }
                remaining.dec();
            })
        })
        .collect();

    let closer_results = results.clone();
    let closer_remaining = Arc::clone(&remaining);
    let closer = thread::spawn(move || {
        closer_remaining.wait();
        closer_results.close();
    });

    for w in workers {
        w.join().unwrap();
    }
    closer.join().unwrap();

    let mut values = Vec::new();
    while let Some(v) = results.recv() {
        values.push(v);
    }

    println!("collected {} results: {:?}", values.len(), values);
    assert_eq!(values.len(), N_TASKS);
    assert!(values.iter().all(|&v| v == 39_088_169));
}

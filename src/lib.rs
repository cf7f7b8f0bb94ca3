//! RingChan - an unbounded multi-producer/multi-consumer channel with select.
//!
//! A small concurrency toolkit: a growable ring-buffer [`Queue`], a
//! [`Countdown`] latch, and the [`Channel`] built on top of both — an
//! unbounded, closable, thread-safe FIFO with blocking and non-blocking
//! receive and a multi-way [`select`].
//!
//! This is a from-scratch Rust take on the channel semantics popularized by
//! sequential-process languages, generalized to arbitrary payload types
//! instead of boxing integers through a pointer-sized slot.
//!
//! # Example
//!
//! ```
//! use ringchan_rs::Channel;
//! use std::thread;
//!
//! let channel = Channel::new();
//! let producer = channel.clone();
//! thread::spawn(move || {
//!     producer.send(1);
//!     producer.send(2);
//!     producer.send(3);
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(channel.recv(), Some(1));
//! assert_eq!(channel.recv(), Some(2));
//! assert_eq!(channel.recv(), Some(3));
//! channel.close();
//! assert_eq!(channel.recv(), None);
//! ```
//!
//! # Select
//!
//! ```
//! use ringchan_rs::{select, Channel};
//!
//! let channels: Vec<Channel<u32>> = (0..3).map(|_| Channel::new()).collect();
//! channels[1].send(42);
//!
//! let (winner, value) = select(&channels);
//! assert_eq!(winner, 1);
//! assert_eq!(value, Some(42));
//! ```

mod channel;
mod countdown;
mod error;
mod invariants;
mod queue;
mod select;

pub use channel::Channel;
pub use countdown::Countdown;
pub use error::ContractViolation;
pub use queue::Queue;
pub use select::select;

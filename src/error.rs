use thiserror::Error;

/// Programmer-error conditions that this crate treats as fatal.
///
/// None of these are returned as a `Result` — they indicate a contract
/// violation (send after close, double close, an empty `Countdown` initial
/// value, ...) and the offending call panics with this type's `Display`
/// message, matching the "contract violation terminates" policy described
/// in the design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// `Channel::send` was called after `Channel::close`.
    #[error("send on a closed channel")]
    SendAfterClose,
    /// `Channel::close` was called on a channel that was already closed.
    #[error("channel is already closed")]
    DoubleClose,
    /// `Queue::get` was called on an empty queue.
    #[error("get on an empty queue")]
    PopEmptyQueue,
    /// `Countdown::new` was called with a non-positive initial value.
    #[error("countdown initial value must be positive, got {0}")]
    NonPositiveCountdown(i64),
}

//! Event sink port: where automation events go.

use labhub_domain::event::Event;

/// Receives automation events as they happen.
///
/// Publishing must be cheap and non-blocking; it is called inline from
/// the scheduler's tick.
pub trait EventSink {
    fn publish(&self, event: Event);
}

/// Discards every event. Useful for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: Event) {}
}

//! Emulated serial link with an open/closed toggle.

use std::sync::atomic::{AtomicBool, Ordering};

use labhub_app::ports::SerialLink;

/// Stand-in for the dashboard's shared serial transport.
///
/// Starts closed, like a dashboard before the operator opens serial
/// communications. Shareable behind an [`Arc`](std::sync::Arc) so the
/// composition root keeps a handle while the scheduler holds another.
#[derive(Debug, Default)]
pub struct EmulatedLink {
    open: AtomicBool,
}

impl EmulatedLink {
    /// A closed link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the transport open.
    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
        tracing::info!("emulated serial link opened");
    }

    /// Mark the transport closed.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        tracing::info!("emulated serial link closed");
    }
}

impl SerialLink for EmulatedLink {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

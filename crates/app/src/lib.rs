//! # labhub-app
//!
//! Application layer: the automation scheduler and **port definitions**
//! (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven ports):
//!   - `FieldTarget`: an instrument widget's named fields and confirm action
//!   - `SerialLink`: whether the shared serial transport is open
//!   - `Clock`: wall-clock time source (swappable for simulated time)
//!   - `EventSink`: where automation events are published
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   the instrument panel (nickname registry), the callback registry,
//!   and the broadcast event bus
//! - Implement the **automation scheduler**: script loading, deadline
//!   planning, and the run-control state machine with its tick loop
//! - Orchestrate domain objects without knowing how devices talk
//!
//! ## Dependency rule
//! Depends on `labhub-domain` only (plus `tokio::sync`/`tokio::time` for
//! the event bus and the tick driver). Never imports adapter crates;
//! adapters depend on *this* crate, not the reverse.

pub mod callbacks;
pub mod event_bus;
pub mod panel;
pub mod ports;
pub mod scheduler;

//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the scheduler and
//! the adapter layer can depend on them without creating circular
//! dependencies.

pub mod clock;
pub mod event_sink;
pub mod field_target;
pub mod link;

pub use clock::{Clock, SystemClock};
pub use event_sink::{EventSink, NullSink};
pub use field_target::FieldTarget;
pub use link::SerialLink;

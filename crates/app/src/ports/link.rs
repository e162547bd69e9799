//! Serial link port: is the shared transport open?
//!
//! Starting an automation run requires the serial side of the dashboard
//! to be up; the scheduler only ever asks this one question about it.

use std::sync::Arc;

/// Reports whether the dashboard's serial transport is open.
pub trait SerialLink {
    fn is_open(&self) -> bool;
}

impl<L: SerialLink + ?Sized> SerialLink for Arc<L> {
    fn is_open(&self) -> bool {
        self.as_ref().is_open()
    }
}

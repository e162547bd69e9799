//! # labhub-adapter-virtual
//!
//! Emulated bench instruments for testing and demonstration: the whole
//! dashboard runs with no hardware attached.
//!
//! ## Provided instruments
//!
//! | Instrument | Fields | Confirm behaviour |
//! |------------|--------|-------------------|
//! | [`MassFlowController`] | `Mode`, `Setpoint (sccm)`, `Flow rate (sccm)` | Applies mode and setpoint to the flow readout |
//! | [`Thermocouple`] | `Temperature (C)` | No-op (readout only) |
//! | [`IotRelay`] | `State`, `Output` | Applies the selected state to the output readout |
//!
//! Also provides [`EmulatedLink`], an openable/closable stand-in for the
//! dashboard's shared serial transport.
//!
//! ## Dependency rule
//!
//! Depends on `labhub-app` (port traits) and `labhub-domain` only.

mod devices;
mod link;

pub use devices::{IotRelay, MassFlowController, Thermocouple};
pub use link::EmulatedLink;

//! Emulated instrument widgets.

mod mass_flow;
mod relay;
mod thermocouple;

pub use mass_flow::MassFlowController;
pub use relay::IotRelay;
pub use thermocouple::Thermocouple;

//! Emulated mass-flow controller.

use labhub_app::ports::FieldTarget;
use labhub_domain::error::{LabHubError, NotFoundError, ValidationError};
use labhub_domain::instrument::{FieldSet, FieldSpec};

const MODE: &str = "Mode";
const SETPOINT: &str = "Setpoint (sccm)";
const FLOW_RATE: &str = "Flow rate (sccm)";

/// A simulated mass-flow controller.
///
/// Confirm behaves like the real device receiving its command frame:
/// the flow readout follows the selected mode, with the setpoint
/// clamped to the device's full-scale range.
pub struct MassFlowController {
    name: String,
    nickname: String,
    max_flow_sccm: f64,
    fields: FieldSet,
}

impl MassFlowController {
    /// Create a controller with the given full-scale flow.
    ///
    /// # Panics
    ///
    /// Only if the hardcoded field declarations collide (they do not).
    #[must_use]
    pub fn new(name: impl Into<String>, nickname: impl Into<String>, max_flow_sccm: f64) -> Self {
        let fields = FieldSet::from_specs([
            FieldSpec::dropdown(MODE, ["Closed", "Setpoint", "Open"], "Closed"),
            FieldSpec::input(SETPOINT, "0.0"),
            FieldSpec::readout(FLOW_RATE, "No reading"),
        ])
        .expect("mass-flow field declarations are distinct");
        Self {
            name: name.into(),
            nickname: nickname.into(),
            max_flow_sccm,
            fields,
        }
    }

    fn apply(&mut self) -> Result<(), LabHubError> {
        let mode = self.fields.get(MODE).unwrap_or("Closed").to_string();
        let flow = match mode.as_str() {
            "Open" => self.max_flow_sccm,
            "Setpoint" => {
                let raw = self.fields.get(SETPOINT).unwrap_or("0.0");
                let setpoint: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::NotANumber(raw.to_string()))?;
                setpoint.clamp(0.0, self.max_flow_sccm)
            }
            _ => 0.0,
        };
        self.fields.set(FLOW_RATE, format!("{flow:.1}"))?;
        tracing::debug!(instrument = %self.nickname, %mode, flow, "mass-flow command applied");
        Ok(())
    }
}

impl FieldTarget for MassFlowController {
    fn name(&self) -> &str {
        &self.name
    }

    fn nickname(&self) -> &str {
        &self.nickname
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.names()
    }

    fn has_field(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    fn get_field(&self, field: &str) -> Result<String, LabHubError> {
        self.fields.get(field).map(str::to_string).ok_or_else(|| {
            NotFoundError {
                entity: "field",
                id: field.to_string(),
            }
            .into()
        })
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), LabHubError> {
        self.fields.set(field, value).map_err(Into::into)
    }

    fn confirm(&mut self) -> Result<(), LabHubError> {
        self.apply()
    }
}

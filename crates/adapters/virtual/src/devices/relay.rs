//! Emulated IoT power relay.

use labhub_app::ports::FieldTarget;
use labhub_domain::error::{LabHubError, NotFoundError};
use labhub_domain::instrument::{FieldSet, FieldSpec};

const STATE: &str = "State";
const OUTPUT: &str = "Output";

/// A simulated switched outlet. Confirm forwards the selected state to
/// the output readout, as the real relay acknowledges its command.
pub struct IotRelay {
    name: String,
    nickname: String,
    fields: FieldSet,
}

impl IotRelay {
    /// Create a relay that is off.
    ///
    /// # Panics
    ///
    /// Only if the hardcoded field declarations collide (they do not).
    #[must_use]
    pub fn new(name: impl Into<String>, nickname: impl Into<String>) -> Self {
        let fields = FieldSet::from_specs([
            FieldSpec::dropdown(STATE, ["Off", "On"], "Off"),
            FieldSpec::readout(OUTPUT, "Off"),
        ])
        .expect("relay field declarations are distinct");
        Self {
            name: name.into(),
            nickname: nickname.into(),
            fields,
        }
    }
}

impl FieldTarget for IotRelay {
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
        let state = self.fields.get(STATE).unwrap_or("Off").to_string();
        self.fields.set(OUTPUT, state.clone())?;
        tracing::debug!(instrument = %self.nickname, %state, "relay command applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay() -> IotRelay {
        IotRelay::new("Heater Relay", "heater_relay")
    }

    #[test]
    fn should_start_off() {
        let relay = relay();
        assert_eq!(relay.get_field(STATE).unwrap(), "Off");
        assert_eq!(relay.get_field(OUTPUT).unwrap(), "Off");
    }

    #[test]
    fn should_not_switch_output_until_confirmed() {
        let mut relay = relay();
        relay.set_field(STATE, "On").unwrap();
        assert_eq!(relay.get_field(OUTPUT).unwrap(), "Off");
    }

    #[test]
    fn should_switch_output_on_confirm() {
        let mut relay = relay();
        relay.set_field(STATE, "On").unwrap();
        relay.confirm().unwrap();
        assert_eq!(relay.get_field(OUTPUT).unwrap(), "On");

        relay.set_field(STATE, "Off").unwrap();
        relay.confirm().unwrap();
        assert_eq!(relay.get_field(OUTPUT).unwrap(), "Off");
    }

    #[test]
    fn should_reject_undeclared_fields() {
        let mut relay = relay();
        assert!(relay.set_field("Voltage", "230").is_err());
    }
}

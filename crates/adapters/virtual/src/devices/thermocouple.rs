//! Emulated thermocouple readout.

use labhub_app::ports::FieldTarget;
use labhub_domain::error::{LabHubError, NotFoundError};
use labhub_domain::instrument::{FieldSet, FieldSpec};

const TEMPERATURE: &str = "Temperature (C)";

/// A simulated thermocouple. Readout only; confirm has nothing to push
/// to the device and is a no-op.
pub struct Thermocouple {
    name: String,
    nickname: String,
    fields: FieldSet,
}

impl Thermocouple {
    /// Create a thermocouple with no reading yet.
    ///
    /// # Panics
    ///
    /// Only if the hardcoded field declarations collide (they do not).
    #[must_use]
    pub fn new(name: impl Into<String>, nickname: impl Into<String>) -> Self {
        let fields = FieldSet::from_specs([FieldSpec::readout(TEMPERATURE, "No reading")])
            .expect("thermocouple field declarations are distinct");
        Self {
            name: name.into(),
            nickname: nickname.into(),
            fields,
        }
    }

    /// Record a reading, as the per-device polling loop would after
    /// parsing a reply frame.
    ///
    /// # Errors
    ///
    /// Propagates the field write, which cannot miss for the hardcoded
    /// field name.
    pub fn record_reading(&mut self, celsius: f64) -> Result<(), LabHubError> {
        self.fields.set(TEMPERATURE, format!("{celsius:.1}"))?;
        Ok(())
    }
}

impl FieldTarget for Thermocouple {
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
        Ok(())
    }
}

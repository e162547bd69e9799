//! Field model for instrument widgets.
//!
//! An instrument exposes a flat set of named string fields: readouts the
//! device reports, inputs the operator edits, and dropdowns with a fixed
//! option list. The declared set doubles as the recognized-field mapping
//! that script loading validates `set` commands against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NotFoundError, ValidationError};

/// What kind of control a field is backed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Display-only value reported by the device.
    Readout,
    /// Free-text value the operator (or a script) sets.
    Input,
    /// One of a fixed list of options.
    Dropdown { options: Vec<String> },
}

/// Declaration of a single field: name, kind, and starting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub default: String,
}

impl FieldSpec {
    /// Declare a display-only readout field.
    #[must_use]
    pub fn readout(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Readout,
            default: default.into(),
        }
    }

    /// Declare an operator-editable input field.
    #[must_use]
    pub fn input(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Input,
            default: default.into(),
        }
    }

    /// Declare a dropdown field with a fixed option list.
    #[must_use]
    pub fn dropdown(
        name: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Dropdown {
                options: options.into_iter().map(Into::into).collect(),
            },
            default: default.into(),
        }
    }
}

/// The declared fields of one instrument plus their current values.
///
/// Declaration order is display order and is preserved by [`names`].
///
/// [`names`]: FieldSet::names
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    specs: Vec<FieldSpec>,
    values: HashMap<String, String>,
}

impl FieldSet {
    /// Build a field set from declarations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateField`] if two declarations
    /// share a name.
    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self, ValidationError> {
        let mut set = Self::default();
        for spec in specs {
            set.add(spec)?;
        }
        Ok(set)
    }

    /// Declare one more field, seeded with its default value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateField`] if the name is taken.
    pub fn add(&mut self, spec: FieldSpec) -> Result<(), ValidationError> {
        if self.values.contains_key(&spec.name) {
            return Err(ValidationError::DuplicateField(spec.name));
        }
        self.values.insert(spec.name.clone(), spec.default.clone());
        self.specs.push(spec);
        Ok(())
    }

    /// Current value of a field, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Overwrite a field's value.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the field was never declared.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), NotFoundError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "field",
                id: name.to_string(),
            }),
        }
    }

    /// Whether a field with this name was declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Declared field names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.name.as_str()).collect()
    }

    /// The declarations themselves, in declaration order.
    #[must_use]
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mfc_fields() -> FieldSet {
        FieldSet::from_specs([
            FieldSpec::dropdown("Mode", ["Closed", "Setpoint", "Open"], "Closed"),
            FieldSpec::input("Setpoint (sccm)", "0.0"),
            FieldSpec::readout("Flow rate (sccm)", "No reading"),
        ])
        .unwrap()
    }

    #[test]
    fn should_seed_fields_with_their_defaults() {
        let fields = mfc_fields();
        assert_eq!(fields.get("Mode"), Some("Closed"));
        assert_eq!(fields.get("Flow rate (sccm)"), Some("No reading"));
    }

    #[test]
    fn should_preserve_declaration_order_in_names() {
        let fields = mfc_fields();
        assert_eq!(
            fields.names(),
            vec!["Mode", "Setpoint (sccm)", "Flow rate (sccm)"]
        );
    }

    #[test]
    fn should_overwrite_value_when_setting_declared_field() {
        let mut fields = mfc_fields();
        fields.set("Setpoint (sccm)", "42.0").unwrap();
        assert_eq!(fields.get("Setpoint (sccm)"), Some("42.0"));
    }

    #[test]
    fn should_return_not_found_when_setting_undeclared_field() {
        let mut fields = mfc_fields();
        let err = fields.set("Color", "red").unwrap_err();
        assert_eq!(err.entity, "field");
        assert_eq!(err.id, "Color");
    }

    #[test]
    fn should_return_none_when_getting_undeclared_field() {
        assert_eq!(mfc_fields().get("Color"), None);
    }

    #[test]
    fn should_reject_duplicate_field_names() {
        let result = FieldSet::from_specs([
            FieldSpec::readout("Temperature (C)", "No reading"),
            FieldSpec::input("Temperature (C)", "0"),
        ]);
        assert!(matches!(
            result,
            Err(ValidationError::DuplicateField(name)) if name == "Temperature (C)"
        ));
    }

    #[test]
    fn should_report_contains_for_declared_fields_only() {
        let fields = mfc_fields();
        assert!(fields.contains("Mode"));
        assert!(!fields.contains("mode"));
    }

    #[test]
    fn should_roundtrip_field_spec_through_serde_json() {
        let spec = FieldSpec::dropdown("State", ["Off", "On"], "Off");
        let json = serde_json::to_string(&spec).unwrap();
        let parsed: FieldSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
    }
}

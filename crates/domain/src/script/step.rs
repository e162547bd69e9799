//! Step actions: the effect a queued automation step performs.

use serde::{Deserialize, Serialize};

/// What a step does when its deadline passes.
///
/// Actions are plain data rather than captured closures, so a loaded
/// queue can be serialized and inspected. Field mutations are resolved
/// against the instrument panel at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepAction {
    /// Set a field on a target instrument, optionally confirming after.
    SetField {
        /// Nickname the target instrument is registered under.
        target: String,
        /// Name of the field to change.
        field: String,
        /// New value, always textual.
        value: String,
        /// Invoke the target's confirm operation after setting.
        #[serde(default = "default_confirm")]
        confirm: bool,
    },
    /// Invoke a named user callback from the callback registry.
    Invoke { callback: String },
}

fn default_confirm() -> bool {
    true
}

impl std::fmt::Display for StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetField {
                target,
                field,
                value,
                confirm,
            } => {
                write!(f, "set({target}.{field} = {value:?}")?;
                if !confirm {
                    f.write_str(", noconfirm")?;
                }
                f.write_str(")")
            }
            Self::Invoke { callback } => write!(f, "call({callback})"),
        }
    }
}

/// One queued automation step: a relative delay plus an action.
///
/// `delay_seconds` counts from the previous step's execution (from run
/// start for step 0). Steps are never mutated after being queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledStep {
    pub delay_seconds: u64,
    pub action: StepAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_set_field_action() {
        let action = StepAction::SetField {
            target: "ch4_mfc".to_string(),
            field: "Setpoint (sccm)".to_string(),
            value: "42.0".to_string(),
            confirm: true,
        };
        assert_eq!(
            action.to_string(),
            "set(ch4_mfc.Setpoint (sccm) = \"42.0\")"
        );
    }

    #[test]
    fn should_display_noconfirm_set_field_action() {
        let action = StepAction::SetField {
            target: "heater_relay".to_string(),
            field: "State".to_string(),
            value: "On".to_string(),
            confirm: false,
        };
        assert_eq!(
            action.to_string(),
            "set(heater_relay.State = \"On\", noconfirm)"
        );
    }

    #[test]
    fn should_display_invoke_action() {
        let action = StepAction::Invoke {
            callback: "log_baseline".to_string(),
        };
        assert_eq!(action.to_string(), "call(log_baseline)");
    }

    #[test]
    fn should_default_confirm_to_true_when_deserializing() {
        let json = serde_json::json!({
            "type": "set_field",
            "target": "ch4_mfc",
            "field": "Mode",
            "value": "Open"
        });
        let action: StepAction = serde_json::from_value(json).unwrap();
        assert!(matches!(action, StepAction::SetField { confirm: true, .. }));
    }

    #[test]
    fn should_roundtrip_steps_through_serde_json() {
        let step = ScheduledStep {
            delay_seconds: 90,
            action: StepAction::Invoke {
                callback: "sample".to_string(),
            },
        };
        let json = serde_json::to_string(&step).unwrap();
        let parsed: ScheduledStep = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
    }
}

//! Common error types used across the workspace.
//!
//! Load-time script errors are fatal to the load attempt only; the
//! surrounding layer resets the queue and reports to the operator.
//! Nothing in here is ever fatal to the process.

/// Top-level domain error.
#[derive(Debug, thiserror::Error)]
pub enum LabHubError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A named thing (instrument, field, callback) does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An automation script failed to load.
    #[error("script error")]
    Script(#[from] ScriptError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An instrument was registered with an empty nickname.
    #[error("instrument nickname must not be empty")]
    EmptyNickname,

    /// Two instruments were registered under the same nickname.
    #[error("duplicate instrument nickname {0:?}")]
    DuplicateNickname(String),

    /// An instrument declared the same field twice.
    #[error("duplicate field {0:?}")]
    DuplicateField(String),

    /// A value that must be numeric could not be parsed as a number.
    #[error("not a number: {0:?}")]
    NotANumber(String),
}

/// A lookup by name or id found nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id:?} not found")]
pub struct NotFoundError {
    /// What kind of thing was looked up ("instrument", "field", ...).
    pub entity: &'static str,
    /// The name or id that missed.
    pub id: String,
}

/// Errors raised while loading an automation script.
///
/// All of these are detected synchronously at load time so that a
/// malformed script is rejected before a single step runs.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// A delay was not `H:M:S` with non-negative integer parts.
    #[error("malformed delay {text:?}: expected H:M:S with non-negative integers")]
    MalformedDelay { text: String },

    /// `set` referenced a field the target instrument does not declare.
    #[error("instrument {target:?} has no field {field:?}")]
    UnknownField { target: String, field: String },

    /// `set` referenced a nickname no instrument is registered under.
    #[error("no instrument is registered under nickname {target:?}")]
    UnknownTarget { target: String },

    /// `call` referenced a callback name that was never registered.
    #[error("no callback is registered under name {name:?}")]
    UnknownCallback { name: String },

    /// The first word of a line is not a known command.
    #[error("line {line}: unrecognized command {command:?}")]
    UnknownCommand { line: usize, command: String },

    /// A line did not match its command's expected shape.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "instrument",
            id: "ch4_mfc".to_string(),
        };
        assert_eq!(err.to_string(), "instrument \"ch4_mfc\" not found");
    }

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: LabHubError = ValidationError::EmptyNickname.into();
        assert!(matches!(err, LabHubError::Validation(_)));
    }

    #[test]
    fn should_wrap_script_error_via_from() {
        let err: LabHubError = ScriptError::MalformedDelay {
            text: "soon".to_string(),
        }
        .into();
        assert!(matches!(err, LabHubError::Script(_)));
    }

    #[test]
    fn should_display_syntax_error_with_line_number() {
        let err = ScriptError::Syntax {
            line: 4,
            message: "set expects a nickname, a field, and a value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 4: set expects a nickname, a field, and a value"
        );
    }

    #[test]
    fn should_display_unknown_field_with_target_and_field() {
        let err = ScriptError::UnknownField {
            target: "ch4_mfc".to_string(),
            field: "Color".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "instrument \"ch4_mfc\" has no field \"Color\""
        );
    }
}

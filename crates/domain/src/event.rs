//! Event: an immutable record of automation activity.
//!
//! Events are produced when scripts are loaded, runs change state, and
//! steps execute or fail. A UI layer subscribes to render a console feed;
//! the scheduler never reads them back.

use serde::{Deserialize, Serialize};

use crate::id::EventId;
use crate::time::{now, Timestamp};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ScriptLoaded,
    RunStarted,
    RunPaused,
    RunStopped,
    RunFinished,
    StepExecuted,
    StepFailed,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::ScriptLoaded => "script_loaded",
            Self::RunStarted => "run_started",
            Self::RunPaused => "run_paused",
            Self::RunStopped => "run_stopped",
            Self::RunFinished => "run_finished",
            Self::StepExecuted => "step_executed",
            Self::StepFailed => "step_failed",
        };
        f.write_str(label)
    }
}

/// A single automation event with a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub kind: EventKind,
    pub at: Timestamp,
    pub data: serde_json::Value,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(kind: EventKind, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            kind,
            at: now(),
            data,
        }
    }
}

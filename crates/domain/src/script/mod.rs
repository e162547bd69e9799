//! Script: an ordered queue of delayed automation steps.
//!
//! A script is authored as text (see [`parse`]), interpreted into
//! [`ScheduledStep`]s by a [`ScriptBuilder`], and executed in load order
//! by the scheduler. Load order is execution order; steps are never
//! reordered or mutated once queued.

mod parse;
mod step;

pub use parse::{parse, ScriptCommand};
pub use step::{ScheduledStep, StepAction};

use serde::{Deserialize, Serialize};

use crate::id::ScriptId;

/// A fully loaded automation script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: ScriptId,
    /// Display name, typically the source file stem.
    pub name: String,
    pub steps: Vec<ScheduledStep>,
}

impl Script {
    /// Number of queued steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script queued no steps at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step delays, the initial total-time-remaining readout.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.steps.iter().map(|step| step.delay_seconds).sum()
    }

    /// Raw delay of step 0, the initial countdown readout. Zero when empty.
    #[must_use]
    pub fn first_delay(&self) -> u64 {
        self.steps.first().map_or(0, |step| step.delay_seconds)
    }
}

/// Accumulates steps while a script is being interpreted.
///
/// Delays do not create steps of their own: consecutive delays sum into
/// a pending accumulator that becomes the relative delay of the next
/// scheduled action, after which the accumulator resets to zero.
#[derive(Debug)]
pub struct ScriptBuilder {
    name: String,
    pending_delay: u64,
    steps: Vec<ScheduledStep>,
}

impl ScriptBuilder {
    /// Start an empty queue for a script with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending_delay: 0,
            steps: Vec::new(),
        }
    }

    /// Add seconds to the pending-delay accumulator.
    pub fn schedule_delay(&mut self, seconds: u64) {
        self.pending_delay += seconds;
    }

    /// Append a step carrying the accumulated delay, then reset the
    /// accumulator.
    pub fn schedule_step(&mut self, action: StepAction) {
        self.steps.push(ScheduledStep {
            delay_seconds: self.pending_delay,
            action,
        });
        self.pending_delay = 0;
    }

    /// Delay currently accrued toward the next scheduled action.
    #[must_use]
    pub fn pending_delay(&self) -> u64 {
        self.pending_delay
    }

    /// Sum of all queued step delays so far.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.steps.iter().map(|step| step.delay_seconds).sum()
    }

    /// Finish the queue. A pending delay with no action after it is
    /// dropped, matching how a trailing `delay` line has nothing to
    /// attach to.
    #[must_use]
    pub fn build(self) -> Script {
        Script {
            id: ScriptId::new(),
            name: self.name,
            steps: self.steps,
        }
    }
}

//! Automation scheduler: loads scripts and drives their execution.
//!
//! The scheduler owns the one script queue the dashboard has, the run
//! state machine (stopped / running / paused / finished), and the tick
//! algorithm that fires due steps. Everything happens cooperatively on
//! the caller's thread: [`AutomationScheduler::tick`] is the only code
//! path that touches run state, and each tick tells the caller whether
//! to tick again immediately, wait one polling interval, or stop.
//!
//! Actions execute synchronously inside a tick. A slow or blocking
//! action stalls the whole dashboard for its duration; automation
//! actions MUST be fast and non-blocking.

pub mod deadline;
pub mod driver;

use serde::Serialize;

use labhub_domain::error::{NotFoundError, ScriptError};
use labhub_domain::event::{Event, EventKind};
use labhub_domain::hms;
use labhub_domain::script::{self, ScheduledStep, Script, ScriptBuilder, ScriptCommand, StepAction};
use labhub_domain::time::{seconds_until, Timestamp};

use crate::callbacks::CallbackRegistry;
use crate::panel::InstrumentPanel;
use crate::ports::{Clock, EventSink, SerialLink};

/// Run state of the one automation queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// No run in progress; the queue is idle and no deadlines exist.
    Stopped,
    /// Ticking; steps fire as their deadlines pass.
    Running,
    /// Ticking suspended; cursor and deadlines held for resume.
    Paused,
    /// The last step ran. Equivalent to [`Mode::Stopped`] for the next
    /// load or start.
    Finished,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The current step is already due; tick again with no delay so
    /// zero-delay steps settle within one tick cascade.
    Immediate,
    /// Tick again after one polling interval.
    AfterInterval,
    /// No run is in progress; the tick chain ends here.
    Idle,
}

/// Run-control and load failures surfaced to the operator.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Start was requested with zero queued steps.
    #[error("no automation script is loaded")]
    EmptyScript,

    /// Start was requested while the serial link is closed.
    #[error("serial communications must be open before starting automation")]
    NotConnected,

    /// Load or start was requested while a run is in progress.
    #[error("an automation run is in progress")]
    RunInProgress,

    /// The script failed to load; the queue was left empty.
    #[error(transparent)]
    Domain(#[from] labhub_domain::error::LabHubError),
}

impl From<ScriptError> for SchedulerError {
    fn from(err: ScriptError) -> Self {
        Self::Domain(err.into())
    }
}

/// Read-only snapshot of the run state for a display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub mode: Mode,
    /// Display name of the loaded script, if any.
    pub script: Option<String>,
    pub steps_done: usize,
    pub steps_total: usize,
    /// Rounded seconds until the current step fires. May dip below zero
    /// transiently when a step is overdue.
    pub seconds_to_next: i64,
    /// Rounded seconds until the final step fires.
    pub seconds_remaining: i64,
}

impl RunStatus {
    /// Progress readout, e.g. `"2/5 steps done."`.
    #[must_use]
    pub fn progress(&self) -> String {
        format!("{}/{} steps done.", self.steps_done, self.steps_total)
    }

    /// Countdown readout in `H:MM:SS`.
    #[must_use]
    pub fn next_in(&self) -> String {
        hms::format(self.seconds_to_next)
    }

    /// Total-time-remaining readout in `H:MM:SS`.
    #[must_use]
    pub fn remaining(&self) -> String {
        hms::format(self.seconds_remaining)
    }
}

/// The automation run controller.
///
/// Generic over its time source, serial-link monitor, and event sink so
/// tests can run against simulated time and captured events.
pub struct AutomationScheduler<C, L, S> {
    clock: C,
    link: L,
    events: S,
    panel: InstrumentPanel,
    callbacks: CallbackRegistry,
    script: Option<Script>,
    mode: Mode,
    /// Index of the next not-yet-executed step.
    cursor: usize,
    /// One absolute deadline per step; valid while running or paused.
    deadlines: Vec<Timestamp>,
    end_time: Option<Timestamp>,
    seconds_to_next: i64,
    seconds_remaining: i64,
}

impl<C, L, S> AutomationScheduler<C, L, S>
where
    C: Clock,
    L: SerialLink,
    S: EventSink,
{
    /// Wire up a scheduler over an instrument panel and callback registry.
    pub fn new(
        clock: C,
        link: L,
        events: S,
        panel: InstrumentPanel,
        callbacks: CallbackRegistry,
    ) -> Self {
        Self {
            clock,
            link,
            events,
            panel,
            callbacks,
            script: None,
            mode: Mode::Stopped,
            cursor: 0,
            deadlines: Vec::new(),
            end_time: None,
            seconds_to_next: 0,
            seconds_remaining: 0,
        }
    }

    /// The registered instruments.
    #[must_use]
    pub fn panel(&self) -> &InstrumentPanel {
        &self.panel
    }

    /// Mutable access to the instruments, e.g. for device polling glue.
    pub fn panel_mut(&mut self) -> &mut InstrumentPanel {
        &mut self.panel
    }

    /// The loaded script, if any.
    #[must_use]
    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    /// Current run mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Snapshot the run state for display.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        RunStatus {
            mode: self.mode,
            script: self.script.as_ref().map(|script| script.name.clone()),
            steps_done: self.cursor,
            steps_total: self.steps().len(),
            seconds_to_next: self.seconds_to_next,
            seconds_remaining: self.seconds_remaining,
        }
    }

    /// Load a script from source text, replacing whatever was loaded.
    ///
    /// Every reference in the script is validated here, before a single
    /// step can run: delays must parse, `set` targets and fields must be
    /// registered on the panel, `call` names must be registered
    /// callbacks. On any failure the queue is left empty.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::RunInProgress`] while running or paused, or the
    /// load-time [`ScriptError`] wrapped in [`SchedulerError::Domain`].
    #[tracing::instrument(skip(self, source))]
    pub fn load(&mut self, name: &str, source: &str) -> Result<(), SchedulerError> {
        if matches!(self.mode, Mode::Running | Mode::Paused) {
            return Err(SchedulerError::RunInProgress);
        }

        // Reset up front so a failed load leaves an empty queue.
        self.script = None;
        self.mode = Mode::Stopped;
        self.cursor = 0;
        self.deadlines.clear();
        self.end_time = None;
        self.seconds_to_next = 0;
        self.seconds_remaining = 0;

        let script = self.interpret(name, source)?;
        self.seconds_to_next = to_i64(script.first_delay());
        self.seconds_remaining = to_i64(script.total_seconds());
        tracing::info!(script = %script.name, steps = script.len(), "loaded automation script");
        self.publish(
            EventKind::ScriptLoaded,
            serde_json::json!({"script": script.name, "steps": script.len()}),
        );
        self.script = Some(script);
        Ok(())
    }

    /// Start a fresh run, or resume a paused one.
    ///
    /// Deadlines are planned anchored at the current wall-clock time
    /// from the current cursor, carrying the remaining countdown on the
    /// in-flight step, so a resumed run picks up exactly where it
    /// paused. The caller begins ticking on success.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::EmptyScript`] with zero queued steps,
    /// [`SchedulerError::NotConnected`] while the serial link is closed,
    /// [`SchedulerError::RunInProgress`] if already running. No state
    /// changes on error.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.mode == Mode::Running {
            return Err(SchedulerError::RunInProgress);
        }
        if self.steps().is_empty() {
            return Err(SchedulerError::EmptyScript);
        }
        if !self.link.is_open() {
            return Err(SchedulerError::NotConnected);
        }

        let resumed = self.mode == Mode::Paused;
        let t0 = self.clock.now();
        let plan = deadline::plan(self.steps(), self.cursor, self.seconds_to_next, t0);
        self.deadlines = plan.deadlines;
        self.end_time = Some(plan.end_time);
        self.mode = Mode::Running;

        tracing::info!(step = self.cursor, resumed, "starting automated script");
        self.publish(
            EventKind::RunStarted,
            serde_json::json!({"step": self.cursor, "resumed": resumed}),
        );
        Ok(())
    }

    /// Suspend ticking, holding cursor, deadlines, and the countdown so
    /// the run can resume. No-op unless running.
    pub fn pause(&mut self) {
        if self.mode != Mode::Running {
            tracing::debug!(mode = %self.mode, "pause requested while not running");
            return;
        }
        self.mode = Mode::Paused;
        tracing::info!(step = self.cursor, "pausing automated script");
        self.publish(EventKind::RunPaused, serde_json::json!({"step": self.cursor}));
    }

    /// Abort the run and rewind to the beginning of the script. The
    /// countdown readout resets to step 0's raw delay, not to anything
    /// derived from elapsed time. No-op unless running or paused.
    pub fn stop(&mut self) {
        if !matches!(self.mode, Mode::Running | Mode::Paused) {
            tracing::debug!(mode = %self.mode, "stop requested while idle");
            return;
        }
        self.mode = Mode::Stopped;
        self.rewind();
        tracing::info!("aborting automated script");
        self.publish(EventKind::RunStopped, serde_json::json!({}));
    }

    /// One pass of the due-check loop.
    ///
    /// Inert unless running: a tick that was already scheduled when a
    /// pause or stop landed must observe the mode flip and do nothing.
    /// When the current step's deadline has passed, its action executes
    /// inline; an action failure is logged in full and swallowed, and
    /// the run proceeds to the next step regardless. Both countdown
    /// readouts are refreshed on every tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode != Mode::Running {
            return TickOutcome::Idle;
        }

        let now = self.clock.now();
        if now > self.deadlines[self.cursor] {
            self.execute_current();
            self.cursor += 1;
            tracing::debug!("{}/{} steps done", self.cursor, self.steps().len());
            if self.cursor == self.steps().len() {
                self.finish();
                return TickOutcome::Idle;
            }
        }
        self.seconds_to_next = seconds_until(self.deadlines[self.cursor], now);
        if let Some(end_time) = self.end_time {
            self.seconds_remaining = seconds_until(end_time, now);
        }

        if self.seconds_to_next <= 0 {
            TickOutcome::Immediate
        } else {
            TickOutcome::AfterInterval
        }
    }

    fn steps(&self) -> &[ScheduledStep] {
        self.script.as_ref().map_or(&[], |script| &script.steps)
    }

    /// Interpret parsed commands into a step queue, validating every
    /// reference against the panel and callback registry.
    fn interpret(&self, name: &str, source: &str) -> Result<Script, SchedulerError> {
        let mut builder = ScriptBuilder::new(name);
        for command in script::parse(source)? {
            match command {
                ScriptCommand::Delay(seconds) => builder.schedule_delay(seconds),
                ScriptCommand::Invoke { callback } => {
                    if !self.callbacks.contains(&callback) {
                        return Err(ScriptError::UnknownCallback { name: callback }.into());
                    }
                    builder.schedule_step(StepAction::Invoke { callback });
                }
                ScriptCommand::SetField {
                    target,
                    field,
                    value,
                    confirm,
                } => {
                    let Some(instrument) = self.panel.resolve(&target) else {
                        return Err(ScriptError::UnknownTarget { target }.into());
                    };
                    if !instrument.has_field(&field) {
                        return Err(ScriptError::UnknownField { target, field }.into());
                    }
                    builder.schedule_step(StepAction::SetField {
                        target,
                        field,
                        value,
                        confirm,
                    });
                }
            }
        }
        Ok(builder.build())
    }

    fn execute_current(&mut self) {
        let step = self.cursor;
        let action = self.steps()[step].action.clone();
        tracing::debug!(step, %action, "executing automation step");

        let result = match action {
            StepAction::SetField {
                target,
                field,
                value,
                confirm,
            } => self.apply_set_field(&target, &field, &value, confirm),
            StepAction::Invoke { callback } => self.callbacks.invoke(&callback, &mut self.panel),
        };

        match result {
            Ok(()) => {
                self.publish(EventKind::StepExecuted, serde_json::json!({"step": step}));
            }
            Err(err) => {
                tracing::error!(
                    step,
                    "automation step failed; continuing with the next step: {err:#}"
                );
                self.publish(
                    EventKind::StepFailed,
                    serde_json::json!({"step": step, "error": err.to_string()}),
                );
            }
        }
    }

    fn apply_set_field(
        &mut self,
        target: &str,
        field: &str,
        value: &str,
        confirm: bool,
    ) -> anyhow::Result<()> {
        let instrument = self.panel.resolve_mut(target).ok_or_else(|| NotFoundError {
            entity: "instrument",
            id: target.to_string(),
        })?;
        let old = instrument.get_field(field)?;
        instrument.set_field(field, value)?;
        tracing::info!(instrument = target, field, from = %old, to = value, "automation set field");
        if confirm {
            instrument.confirm()?;
        }
        Ok(())
    }

    /// End-of-script reset: rewind to step 0 with fresh readouts so the
    /// next start replays from the top.
    fn finish(&mut self) {
        let total = self.steps().len();
        self.mode = Mode::Finished;
        self.rewind();
        tracing::info!(steps = total, "automated script finished");
        self.publish(EventKind::RunFinished, serde_json::json!({"steps": total}));
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.seconds_to_next = to_i64(self.script.as_ref().map_or(0, Script::first_delay));
        self.seconds_remaining = to_i64(self.script.as_ref().map_or(0, Script::total_seconds));
    }

    fn publish(&self, kind: EventKind, data: serde_json::Value) {
        self.events.publish(Event::new(kind, data));
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

//! Deadline planning: relative step delays to absolute wall-clock times.

use chrono::TimeDelta;

use labhub_domain::script::ScheduledStep;
use labhub_domain::time::Timestamp;

/// One absolute deadline per step, anchored to a run (or resume) instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlinePlan {
    /// Deadline for every step, index-aligned with the step sequence.
    pub deadlines: Vec<Timestamp>,
    /// Deadline of the final step; drives the total-time-remaining readout.
    pub end_time: Timestamp,
}

/// Plan deadlines for a run starting (or resuming) at `t0`.
///
/// Steps before `cursor` were already executed or skipped; they get
/// deadline `t0`. The step at `cursor` comes due `seconds_until_due`
/// seconds from `t0`: its raw delay on a fresh start, or whatever
/// countdown was left on it when the run paused. Every later step
/// stacks its own raw delay on top, so resuming never compresses or
/// stretches the remainder of the script.
#[must_use]
pub fn plan(
    steps: &[ScheduledStep],
    cursor: usize,
    seconds_until_due: i64,
    t0: Timestamp,
) -> DeadlinePlan {
    debug_assert!(cursor < steps.len(), "cannot plan past the end of a script");

    let mut deadlines = Vec::with_capacity(steps.len());
    deadlines.extend(std::iter::repeat_n(t0, cursor));

    let mut deadline = t0 + TimeDelta::seconds(seconds_until_due);
    deadlines.push(deadline);
    for step in &steps[cursor + 1..] {
        deadline += TimeDelta::seconds(delay_seconds(step));
        deadlines.push(deadline);
    }

    DeadlinePlan {
        end_time: deadline,
        deadlines,
    }
}

fn delay_seconds(step: &ScheduledStep) -> i64 {
    i64::try_from(step.delay_seconds).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use labhub_domain::script::StepAction;

    fn steps(delays: &[u64]) -> Vec<ScheduledStep> {
        delays
            .iter()
            .map(|&delay_seconds| ScheduledStep {
                delay_seconds,
                action: StepAction::Invoke {
                    callback: "noop".to_string(),
                },
            })
            .collect()
    }

    fn t0() -> Timestamp {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn secs(ts: Timestamp, offset: i64) -> Timestamp {
        ts + TimeDelta::seconds(offset)
    }

    #[test]
    fn should_stack_delays_additively_from_a_fresh_start() {
        let steps = steps(&[5, 3, 0, 2]);
        let plan = plan(&steps, 0, 5, t0());

        assert_eq!(
            plan.deadlines,
            vec![secs(t0(), 5), secs(t0(), 8), secs(t0(), 8), secs(t0(), 10)]
        );
        assert_eq!(plan.end_time, secs(t0(), 10));
    }

    #[test]
    fn should_anchor_executed_steps_at_t0_when_resuming() {
        let steps = steps(&[5, 3, 2]);
        // Paused with 7 seconds left on step 1.
        let plan = plan(&steps, 1, 7, t0());

        assert_eq!(
            plan.deadlines,
            vec![t0(), secs(t0(), 7), secs(t0(), 9)]
        );
        assert_eq!(plan.end_time, secs(t0(), 9));
    }

    #[test]
    fn should_preserve_later_delays_regardless_of_carried_countdown() {
        let steps = steps(&[10, 4, 6]);
        let short = plan(&steps, 1, 1, t0());
        let long = plan(&steps, 1, 4, t0());

        // The gap between step 1 and step 2 is step 2's raw delay either way.
        assert_eq!(short.deadlines[2] - short.deadlines[1], TimeDelta::seconds(6));
        assert_eq!(long.deadlines[2] - long.deadlines[1], TimeDelta::seconds(6));
    }

    #[test]
    fn should_plan_a_single_step_script() {
        let steps = steps(&[30]);
        let plan = plan(&steps, 0, 30, t0());
        assert_eq!(plan.deadlines, vec![secs(t0(), 30)]);
        assert_eq!(plan.end_time, secs(t0(), 30));
    }

    #[test]
    fn should_accept_an_overdue_carried_countdown() {
        let steps = steps(&[5, 5]);
        // The in-flight step was already due when the run paused.
        let plan = plan(&steps, 0, -2, t0());
        assert_eq!(plan.deadlines[0], secs(t0(), -2));
        assert_eq!(plan.deadlines[1], secs(t0(), 3));
    }

    #[test]
    fn should_put_all_zero_delay_steps_at_the_anchor() {
        let steps = steps(&[0, 0, 0]);
        let plan = plan(&steps, 0, 0, t0());
        assert_eq!(plan.deadlines, vec![t0(), t0(), t0()]);
        assert_eq!(plan.end_time, t0());
    }
}

//! Tick driver: turns tick outcomes into a cooperative polling loop.
//!
//! This is the only place automation touches a timer. The scheduler
//! itself just reports what should happen next; the driver sleeps one
//! polling interval between ticks, re-ticks with no delay while steps
//! are due, and returns when the run leaves the running state (finished,
//! paused, or stopped).
//!
//! Because actions execute inline within `tick`, everything sharing this
//! task (other widgets' polling included) stalls while an action runs.
//! Automation actions MUST be fast and non-blocking; that constraint is
//! part of the scheduling contract, not an implementation detail.

use std::time::Duration;

use crate::ports::{Clock, EventSink, SerialLink};
use crate::scheduler::{AutomationScheduler, TickOutcome};

/// Tick the scheduler until the run is no longer running.
///
/// At most one tick is ever pending: each loop iteration either ticks
/// again immediately, sleeps one `poll_interval` and ticks, or returns.
/// A pause or stop that lands while the driver sleeps is observed by
/// the next tick, which is inert and ends the loop.
pub async fn drive<C, L, S>(scheduler: &mut AutomationScheduler<C, L, S>, poll_interval: Duration)
where
    C: Clock,
    L: SerialLink,
    S: EventSink,
{
    loop {
        match scheduler.tick() {
            TickOutcome::Immediate => {}
            TickOutcome::AfterInterval => tokio::time::sleep(poll_interval).await,
            TickOutcome::Idle => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::callbacks::CallbackRegistry;
    use crate::panel::InstrumentPanel;
    use crate::ports::{NullSink, SystemClock};
    use crate::scheduler::Mode;

    struct OpenLink;

    impl SerialLink for OpenLink {
        fn is_open(&self) -> bool {
            true
        }
    }

    fn scheduler_with_counter(
    ) -> (AutomationScheduler<SystemClock, OpenLink, NullSink>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut callbacks = CallbackRegistry::new();
        callbacks.register("mark", move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let scheduler = AutomationScheduler::new(
            SystemClock,
            OpenLink,
            NullSink,
            InstrumentPanel::new(),
            callbacks,
        );
        (scheduler, calls)
    }

    #[tokio::test]
    async fn should_drive_a_zero_delay_script_to_finished() {
        let (mut scheduler, calls) = scheduler_with_counter();
        scheduler
            .load("burst", "call mark\ncall mark\ncall mark")
            .unwrap();
        scheduler.start().unwrap();

        drive(&mut scheduler, Duration::from_millis(5)).await;

        assert_eq!(scheduler.mode(), Mode::Finished);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn should_wait_out_short_delays_between_steps() {
        let (mut scheduler, calls) = scheduler_with_counter();
        scheduler
            .load("paced", "call mark\ndelay 0:00:01\ncall mark")
            .unwrap();
        scheduler.start().unwrap();

        drive(&mut scheduler, Duration::from_millis(5)).await;

        assert_eq!(scheduler.mode(), Mode::Finished);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_return_immediately_when_nothing_is_running() {
        let (mut scheduler, calls) = scheduler_with_counter();
        drive(&mut scheduler, Duration::from_millis(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

//! Time and timestamp helpers.
//!
//! Automation deadlines are wall-clock times. A system clock adjustment
//! while a script is running shifts the firing times with it; this is a
//! known limitation of the wall-clock countdown semantics.

use chrono::{DateTime, Utc};

/// UTC timestamp used for step deadlines, event times, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whole seconds from `now` until `deadline`, rounded to the nearest
/// second. Negative once the deadline has passed.
#[must_use]
pub fn seconds_until(deadline: Timestamp, now: Timestamp) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    (millis + 500).div_euclid(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_round_seconds_until_to_nearest_second() {
        let t0 = now();
        assert_eq!(seconds_until(t0 + TimeDelta::milliseconds(7400), t0), 7);
        assert_eq!(seconds_until(t0 + TimeDelta::milliseconds(7600), t0), 8);
    }

    #[test]
    fn should_return_zero_when_deadline_is_now() {
        let t0 = now();
        assert_eq!(seconds_until(t0, t0), 0);
    }

    #[test]
    fn should_return_negative_seconds_for_passed_deadline() {
        let t0 = now();
        assert_eq!(seconds_until(t0 - TimeDelta::seconds(3), t0), -3);
    }
}

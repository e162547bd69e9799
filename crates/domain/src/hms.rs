//! `H:M:S` duration parsing and rendering.
//!
//! Script delays are written the way operators read bench timers:
//! `0:00:05`, `1:30:00`, and so on. Parsing accepts any non-negative
//! integer in each position (`0:90:00` is ninety minutes); rendering
//! always normalizes to `H:MM:SS`.

use crate::error::ScriptError;

/// Parse an `H:M:S` duration into whole seconds.
///
/// # Errors
///
/// Returns [`ScriptError::MalformedDelay`] unless the text is exactly
/// three colon-separated non-negative integers.
pub fn parse(text: &str) -> Result<u64, ScriptError> {
    let malformed = || ScriptError::MalformedDelay {
        text: text.to_string(),
    };

    let mut parts = text.split(':');
    let (Some(h), Some(m), Some(s), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let h: u64 = h.trim().parse().map_err(|_| malformed())?;
    let m: u64 = m.trim().parse().map_err(|_| malformed())?;
    let s: u64 = s.trim().parse().map_err(|_| malformed())?;
    Ok(h * 3600 + m * 60 + s)
}

/// Render seconds as `H:MM:SS`. Negative inputs clamp to `0:00:00`,
/// matching how a countdown readout behaves once a deadline has passed.
#[must_use]
pub fn format(total_seconds: i64) -> String {
    let total = u64::try_from(total_seconds).unwrap_or(0);
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_zero_duration() {
        assert_eq!(parse("0:00:00").unwrap(), 0);
    }

    #[test]
    fn should_parse_hours_minutes_and_seconds() {
        assert_eq!(parse("1:30:05").unwrap(), 5405);
    }

    #[test]
    fn should_accept_unnormalized_minutes() {
        assert_eq!(parse("0:90:00").unwrap(), 5400);
    }

    #[test]
    fn should_reject_two_part_durations() {
        assert!(matches!(
            parse("05:30"),
            Err(ScriptError::MalformedDelay { .. })
        ));
    }

    #[test]
    fn should_reject_four_part_durations() {
        assert!(parse("0:00:00:05").is_err());
    }

    #[test]
    fn should_reject_negative_components() {
        assert!(parse("0:-5:00").is_err());
    }

    #[test]
    fn should_reject_non_numeric_components() {
        assert!(parse("one:00:00").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn should_report_the_offending_text() {
        let err = parse("soon").unwrap_err();
        assert!(matches!(err, ScriptError::MalformedDelay { text } if text == "soon"));
    }

    #[test]
    fn should_format_seconds_as_h_mm_ss() {
        assert_eq!(format(0), "0:00:00");
        assert_eq!(format(5), "0:00:05");
        assert_eq!(format(5405), "1:30:05");
    }

    #[test]
    fn should_clamp_negative_seconds_to_zero() {
        assert_eq!(format(-12), "0:00:00");
    }

    #[test]
    fn should_roundtrip_parse_and_format() {
        assert_eq!(format(i64::try_from(parse("2:07:09").unwrap()).unwrap()), "2:07:09");
    }
}

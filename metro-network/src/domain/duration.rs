//! Segment durations between neighbouring stations.
//!
//! Travel times are written in a compact text form such as `"2M21S"`
//! (2 minutes 21 seconds). This is the ISO-8601 time part without its
//! `PT` prefix, which is also accepted.

use chrono::Duration;
use std::fmt;
use std::str::FromStr;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;

/// Error returned when parsing an invalid segment duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration: {reason}")]
pub struct DurationError {
    reason: &'static str,
}

impl DurationError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The travel time of one segment, always at least one whole second.
///
/// # Examples
///
/// ```
/// use metro_network::domain::SegmentDuration;
///
/// let d = SegmentDuration::parse("2M21S").unwrap();
/// assert_eq!(d.whole_seconds(), 141);
/// assert_eq!(d.to_string(), "2M21S");
///
/// // Must be strictly positive
/// assert!(SegmentDuration::parse("0S").is_err());
/// assert!(SegmentDuration::parse("-2M").is_err());
///
/// // Must be well formed
/// assert!(SegmentDuration::parse("2:21").is_err());
/// assert!(SegmentDuration::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentDuration(Duration);

impl SegmentDuration {
    /// Parse a duration from its compact text form.
    ///
    /// Accepts `[<n>H][<n>M][<n>[.<fraction>]S]` in that order, case-insensitive,
    /// with an optional `PT` prefix. Each number may carry a leading `-`.
    /// The total must amount to at least one whole second.
    pub fn parse(s: &str) -> Result<Self, DurationError> {
        let total = parse_compact(s)?;
        Self::from_duration(total)
    }

    /// Wrap an existing duration, rejecting anything below one second.
    pub fn from_duration(duration: Duration) -> Result<Self, DurationError> {
        if duration.num_seconds() <= 0 {
            return Err(DurationError::new("must be greater than 0 seconds"));
        }
        Ok(Self(duration))
    }

    /// Returns the underlying duration.
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Returns the number of whole seconds, truncating any fraction.
    pub fn whole_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl FromStr for SegmentDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for SegmentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentDuration({self})")
    }
}

impl fmt::Display for SegmentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0.num_seconds();
        let nanos = self.0.subsec_nanos();

        let hours = seconds / SECONDS_PER_HOUR;
        let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let secs = seconds % SECONDS_PER_MINUTE;

        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if nanos > 0 {
            let fraction = format!("{nanos:09}");
            write!(f, "{secs}.{}S", fraction.trim_end_matches('0'))?;
        } else if secs > 0 {
            write!(f, "{secs}S")?;
        }
        Ok(())
    }
}

/// Parse the compact form into a signed duration without range checks.
fn parse_compact(s: &str) -> Result<Duration, DurationError> {
    let text = s.trim();
    let text = match text.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("PT") => &text[2..],
        _ => text,
    };

    if text.is_empty() {
        return Err(DurationError::new("expected at least one of H, M or S"));
    }

    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut total_nanos: i64 = 0;
    // Units must appear in the order H, M, S and at most once each.
    let mut last_rank = 0;

    while pos < bytes.len() {
        let negative = bytes[pos] == b'-';
        if negative || bytes[pos] == b'+' {
            pos += 1;
        }

        let whole = take_digits(bytes, &mut pos);
        if whole.is_empty() {
            return Err(DurationError::new("expected digits"));
        }

        let fraction = if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            let digits = take_digits(bytes, &mut pos);
            if digits.is_empty() || digits.len() > 9 {
                return Err(DurationError::new("fraction must have 1 to 9 digits"));
            }
            Some(digits)
        } else {
            None
        };

        let unit = bytes
            .get(pos)
            .map(u8::to_ascii_uppercase)
            .ok_or_else(|| DurationError::new("missing unit after number"))?;
        pos += 1;

        let (rank, unit_seconds) = match unit {
            b'H' => (1, SECONDS_PER_HOUR),
            b'M' => (2, SECONDS_PER_MINUTE),
            b'S' => (3, 1),
            _ => return Err(DurationError::new("unit must be H, M or S")),
        };
        if rank <= last_rank {
            return Err(DurationError::new("units must appear once, in order H, M, S"));
        }
        last_rank = rank;

        if fraction.is_some() && unit != b'S' {
            return Err(DurationError::new("only seconds may have a fraction"));
        }

        let value: i64 = std::str::from_utf8(whole)
            .ok()
            .and_then(|d| d.parse().ok())
            .ok_or_else(|| DurationError::new("number out of range"))?;

        let mut nanos = value
            .checked_mul(unit_seconds)
            .and_then(|secs| secs.checked_mul(NANOS_PER_SECOND))
            .ok_or_else(|| DurationError::new("number out of range"))?;

        if let Some(digits) = fraction {
            nanos = nanos
                .checked_add(fraction_nanos(digits))
                .ok_or_else(|| DurationError::new("number out of range"))?;
        }

        let signed = if negative { -nanos } else { nanos };
        total_nanos = total_nanos
            .checked_add(signed)
            .ok_or_else(|| DurationError::new("number out of range"))?;
    }

    Ok(Duration::nanoseconds(total_nanos))
}

/// Advance past a run of ASCII digits, returning them.
fn take_digits<'a>(bytes: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    &bytes[start..*pos]
}

/// Convert up to nine fractional digits into nanoseconds.
fn fraction_nanos(digits: &[u8]) -> i64 {
    let mut nanos: i64 = 0;
    for i in 0..9 {
        let digit = digits.get(i).map_or(0, |d| i64::from(d - b'0'));
        nanos = nanos * 10 + digit;
    }
    nanos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> i64 {
        SegmentDuration::parse(s).unwrap().whole_seconds()
    }

    #[test]
    fn parse_minutes_and_seconds() {
        assert_eq!(secs("2M21S"), 141);
        assert_eq!(secs("1M58S"), 118);
        assert_eq!(secs("3M"), 180);
        assert_eq!(secs("45S"), 45);
        assert_eq!(secs("1H"), 3600);
        assert_eq!(secs("1H2M3S"), 3723);
    }

    #[test]
    fn accepts_prefix_and_lowercase() {
        assert_eq!(secs("PT2M21S"), 141);
        assert_eq!(secs("pt4m26s"), 266);
        assert_eq!(secs(" 2m10s "), 130);
    }

    #[test]
    fn fractional_seconds() {
        let d = SegmentDuration::parse("1.5S").unwrap();
        assert_eq!(d.whole_seconds(), 1);
        assert_eq!(d.as_duration(), Duration::milliseconds(1500));
    }

    #[test]
    fn rejects_non_positive() {
        assert!(SegmentDuration::parse("0S").is_err());
        assert!(SegmentDuration::parse("0M0S").is_err());
        assert!(SegmentDuration::parse("-1M").is_err());
        assert!(SegmentDuration::parse("1M-61S").is_err());
        // Below one whole second
        assert!(SegmentDuration::parse("0.5S").is_err());
    }

    #[test]
    fn negative_component_can_be_offset() {
        assert_eq!(secs("2M-30S"), 90);
    }

    #[test]
    fn rejects_malformed() {
        assert!(SegmentDuration::parse("").is_err());
        assert!(SegmentDuration::parse("PT").is_err());
        assert!(SegmentDuration::parse("2").is_err());
        assert!(SegmentDuration::parse("M").is_err());
        assert!(SegmentDuration::parse("2X").is_err());
        assert!(SegmentDuration::parse("2:21").is_err());
        assert!(SegmentDuration::parse("21S2M").is_err());
        assert!(SegmentDuration::parse("2M3M").is_err());
        assert!(SegmentDuration::parse("1.5M").is_err());
        assert!(SegmentDuration::parse("1.S").is_err());
        assert!(SegmentDuration::parse("1.1234567891S").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(SegmentDuration::parse("99999999999999999999S").is_err());
        assert!(SegmentDuration::parse("9999999999999H").is_err());
    }

    #[test]
    fn display_compact_form() {
        let show = |s: &str| SegmentDuration::parse(s).unwrap().to_string();
        assert_eq!(show("2M21S"), "2M21S");
        assert_eq!(show("180S"), "3M");
        assert_eq!(show("3600S"), "1H");
        assert_eq!(show("1H0M5S"), "1H5S");
        assert_eq!(show("1.250S"), "1.25S");
    }

    #[test]
    fn from_str_matches_parse() {
        let d: SegmentDuration = "4M26S".parse().unwrap();
        assert_eq!(d, SegmentDuration::parse("4M26S").unwrap());
    }

    #[test]
    fn ordering_follows_length() {
        let short = SegmentDuration::parse("1M30S").unwrap();
        let long = SegmentDuration::parse("3M19S").unwrap();
        assert!(short < long);
    }

    #[test]
    fn error_display() {
        let err = SegmentDuration::parse("0S").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid duration: must be greater than 0 seconds"
        );
    }
}

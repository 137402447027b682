//! Parsing of human-readable configuration values.

use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid duration `{0}` (expected e.g. 30s, 15m, 12h, 7d, 2w, 1y)")]
pub struct ParseDurationError(pub String);

/// Parse a duration string such as `"500ms"`, `"30s"`, `"15m"`, `"12h"`, `"7d"`,
/// `"2w"` or `"1y"` (a year is 365.25 days).
///
/// A bare number is read as seconds. Zero-length durations are rejected since a
/// token that expires on issue is never useful.
pub fn parse_duration(s: &str) -> Result<Duration, ParseDurationError> {
    let raw = s.trim().to_lowercase();
    let (num_str, unit_ms) = if let Some(n) = raw.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = raw.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = raw.strip_suffix('m') {
        (n, 60 * 1_000)
    } else if let Some(n) = raw.strip_suffix('h') {
        (n, 60 * 60 * 1_000)
    } else if let Some(n) = raw.strip_suffix('d') {
        (n, 24 * 60 * 60 * 1_000)
    } else if let Some(n) = raw.strip_suffix('w') {
        (n, 7 * 24 * 60 * 60 * 1_000)
    } else if let Some(n) = raw.strip_suffix('y') {
        (n, 36525 * 24 * 60 * 60 * 10)
    } else {
        (raw.as_str(), 1_000)
    };

    let n = num_str
        .trim()
        .parse::<u64>()
        .map_err(|_| ParseDurationError(s.to_string()))?;
    let millis = n
        .checked_mul(unit_ms)
        .filter(|ms| *ms > 0)
        .ok_or_else(|| ParseDurationError(s.to_string()))?;

    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_duration("100ms"), Ok(Duration::from_millis(100)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("15m"), Ok(Duration::from_secs(900)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("7d"), Ok(Duration::from_secs(7 * 24 * 3600)));
        assert_eq!(parse_duration(" 2D "), Ok(Duration::from_secs(2 * 24 * 3600)));
        assert_eq!(parse_duration("1w"), Ok(Duration::from_secs(7 * 24 * 3600)));
        assert_eq!(parse_duration("1y"), Ok(Duration::from_secs(31_557_600)));
    }

    #[test]
    fn bare_number_is_seconds() {
        assert_eq!(parse_duration("3600"), Ok(Duration::from_secs(3600)));
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("1x").is_err());
        assert!(parse_duration("-5m").is_err());
        assert!(parse_duration("0s").is_err());
    }
}

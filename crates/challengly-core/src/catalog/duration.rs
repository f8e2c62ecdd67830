//! Time-label parsing and countdown formatting.

/// Fallback countdown length: 15 minutes.
pub const DEFAULT_DURATION_SECS: u64 = 900;

const MINUTE_TOKEN: &str = "minute";

/// Resolve a free-text time label into seconds.
///
/// Only labels containing `"minute"` are parsed. The leading integer is
/// read the way a lenient integer parse reads it: leading whitespace and an
/// optional sign are skipped, then digits are consumed up to the first
/// non-digit, so `"0.5 minutes"` yields 0. Anything else, including
/// negative or overflowing values, falls back to `default_secs`.
pub fn parse_duration_secs(label: &str, default_secs: u64) -> u64 {
    if !label.contains(MINUTE_TOKEN) {
        return default_secs;
    }
    match leading_integer(label) {
        Some(minutes) if minutes >= 0 => (minutes as u64)
            .checked_mul(60)
            .unwrap_or(default_secs),
        _ => default_secs,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Render seconds as `mm:ss`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

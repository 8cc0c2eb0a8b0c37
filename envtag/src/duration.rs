//! Duration grammar: `"300ms"`, `"1h30m"`, `"2.5s"`

use std::time::Duration;

use crate::error::ConversionError;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("h", 3_600 * NANOS_PER_SECOND),
];

// Durations are capped at what a signed 64-bit nanosecond counter can hold.
const MAX_NANOS: u128 = i64::MAX as u128;

/// Parse a duration string.
///
/// The text is an optional sign followed by one or more decimal numbers, each
/// with an optional fraction and a mandatory unit suffix (`ns`, `us`, `µs`,
/// `ms`, `s`, `m`, `h`). The single exception is `"0"`, which needs no unit.
///
/// Negative durations other than zero are rejected because [`Duration`] is unsigned.
pub fn parse_duration(text: &str) -> Result<Duration, ConversionError> {
    let malformed = || ConversionError::malformed(text, "duration");

    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(malformed());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed());
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_len);
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(malformed)?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| malformed())?
        };
        if whole > MAX_NANOS / scale {
            return Err(malformed());
        }
        let mut nanos = whole * scale;

        if !fraction.is_empty() {
            // digits past 1e-18 cannot move the nanosecond total
            let digits = &fraction[..fraction.len().min(18)];
            let numerator: u128 = digits.parse().map_err(|_| malformed())?;
            let denominator = 10u128.pow(digits.len() as u32);
            nanos = nanos
                .checked_add(numerator * scale / denominator)
                .ok_or_else(malformed)?;
        }

        total = total
            .checked_add(nanos)
            .filter(|total| *total <= MAX_NANOS)
            .ok_or_else(malformed)?;
        rest = tail;
    }

    if negative && total != 0 {
        return Err(ConversionError::malformed(text, "non-negative duration"));
    }

    Ok(Duration::from_nanos(total as u64))
}

/// Render a duration the way [`parse_duration`] reads it, e.g. `"1h30m0s"`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos, 1_000));
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{}ms", with_fraction(nanos, 1_000_000));
    }

    let hours = nanos / (3_600 * NANOS_PER_SECOND);
    let minutes = (nanos / (60 * NANOS_PER_SECOND)) % 60;
    let seconds = nanos % (60 * NANOS_PER_SECOND);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{}s", with_fraction(seconds, NANOS_PER_SECOND)));
    out
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn with_fraction(nanos: u128, unit: u128) -> String {
    let whole = nanos / unit;
    let remainder = nanos % unit;
    if remainder == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let fraction = format!("{remainder:0width$}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

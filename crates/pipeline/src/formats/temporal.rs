//! Strict date/time readers for the bundled encodings.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ConvertError;

/// Read a date in `pattern` (a chrono format), requiring exactly `width` chars.
pub fn parse_date(raw: &str, pattern: &str, width: usize) -> Result<NaiveDate, ConvertError> {
    if raw.len() != width {
        return Err(ConvertError::invalid(raw, "date"));
    }
    NaiveDate::parse_from_str(raw, pattern).map_err(|_| ConvertError::invalid(raw, "date"))
}

/// Read `HH:MM:SS.f…` with exactly `digits` fractional digits.
pub fn parse_clock(raw: &str, digits: u8) -> Result<NaiveTime, ConvertError> {
    let (time, found) = parse_clock_any(raw)?;
    if found != digits {
        return Err(ConvertError::invalid(raw, "time"));
    }
    Ok(time)
}

/// Read `HH:MM:SS` with an optional fraction of 1 to 9 digits.
/// Returns the time and how many fractional digits it had.
pub fn parse_clock_any(raw: &str) -> Result<(NaiveTime, u8), ConvertError> {
    let invalid = || ConvertError::invalid(raw, "time");

    let (base, fraction) = match raw.split_once('.') {
        Some((base, fraction)) => (base, Some(fraction)),
        None => (raw, None),
    };
    if base.len() != 8 {
        return Err(invalid());
    }
    let time = NaiveTime::parse_from_str(base, "%H:%M:%S").map_err(|_| invalid())?;

    let Some(fraction) = fraction else {
        return Ok((time, 0));
    };
    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits = fraction.len() as u8;
    let scaled: u32 = fraction.parse().map_err(|_| invalid())?;
    let nanos = scaled * 10u32.pow(9 - digits as u32);
    let time = time.with_nanosecond(nanos).ok_or_else(invalid)?;

    Ok((time, digits))
}

/// Read `<date> <clock>` where the date follows `pattern` and the clock has
/// exactly `digits` fractional digits.
pub fn parse_datetime(
    raw: &str,
    pattern: &str,
    width: usize,
    digits: u8,
) -> Result<NaiveDateTime, ConvertError> {
    let (date, clock) = raw
        .split_once(' ')
        .ok_or_else(|| ConvertError::invalid(raw, "datetime"))?;
    let date = parse_date(date, pattern, width)?;
    let time = parse_clock(clock, digits)?;
    Ok(date.and_time(time))
}

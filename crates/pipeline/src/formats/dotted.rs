//! Space-separated encoding: `DATE TIME LEVEL MESSAGE`.
//!
//! ```text
//! 10.03.2025 15:14:49.523 INFORMATION Program version: '3.4.0.48729'
//! ```

use crate::error::{ConvertError, FormatError};
use crate::format::Format;
use crate::part::{Part, PartSet, PartType};
use crate::value::{clock, FieldValue};

use super::level::{level_part, LevelForm};
use super::temporal::{parse_clock, parse_date};

pub const SEPARATOR: char = ' ';

pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const LEVEL: &str = "level";
pub const MESSAGE: &str = "message";

const DATE_PATTERN: &str = "%d.%m.%Y";
const TIME_DIGITS: u8 = 3;

pub fn dotted_format() -> Result<Format, FormatError> {
    let parts = PartSet::builder()
        .part(DATE, date_part())
        .part(TIME, time_part())
        .part(LEVEL, level_part(LevelForm::Long))
        .part(MESSAGE, Part::text())
        .build()?;
    Ok(Format::delimited(SEPARATOR, parts))
}

fn date_part() -> Part {
    Part::new(
        PartType::DateTime,
        |raw| {
            let raw = raw.ok_or(ConvertError::Missing)?;
            parse_date(raw, DATE_PATTERN, 10).map(FieldValue::Date)
        },
        |value| match value {
            Some(FieldValue::Date(d)) => Ok(d.format(DATE_PATTERN).to_string()),
            Some(other) => Err(ConvertError::WrongKind {
                expected: "date",
                found: other.kind(),
            }),
            None => Err(ConvertError::Missing),
        },
    )
}

fn time_part() -> Part {
    Part::new(
        PartType::DateTime,
        |raw| {
            let raw = raw.ok_or(ConvertError::Missing)?;
            parse_clock(raw, TIME_DIGITS).map(|value| FieldValue::Time {
                value,
                digits: TIME_DIGITS,
            })
        },
        |value| match value {
            Some(FieldValue::Time { value, digits }) => Ok(clock(value, *digits)),
            Some(other) => Err(ConvertError::WrongKind {
                expected: "time",
                found: other.kind(),
            }),
            None => Err(ConvertError::Missing),
        },
    )
}

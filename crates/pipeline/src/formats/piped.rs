//! Pipe-separated encoding:
//! `DATETIME|LEVEL|THREAD_ID|CALLING_METHOD|MESSAGE`, fields padded freely.
//!
//! ```text
//! 2025-03-10 15:14:51.5882| INFO|11|MobileComputer.GetDeviceId| Device id: '@MINDEO-M40-D-410244015546'
//! ```

use crate::error::{ConvertError, FormatError};
use crate::format::Format;
use crate::part::{Part, PartSet, PartType};
use crate::value::{clock, FieldValue};

use super::level::{level_part, LevelForm};
use super::temporal::parse_datetime;

pub const SEPARATOR: char = '|';

pub const DATETIME: &str = "datetime";
pub const LEVEL: &str = "level";
pub const THREAD_ID: &str = "thread_id";
pub const CALLING_METHOD: &str = "calling_method";
pub const MESSAGE: &str = "message";

const DATE_PATTERN: &str = "%Y-%m-%d";
const TIME_DIGITS: u8 = 4;

pub fn piped_format() -> Result<Format, FormatError> {
    let parts = PartSet::builder()
        .part(DATETIME, datetime_part())
        .part(LEVEL, level_part(LevelForm::Short))
        .part(THREAD_ID, Part::integer())
        .part(CALLING_METHOD, Part::trimmed_text())
        .part(MESSAGE, Part::trimmed_text())
        .build()?;
    Ok(Format::delimited(SEPARATOR, parts))
}

fn datetime_part() -> Part {
    Part::new(
        PartType::DateTime,
        |raw| {
            let raw = raw.ok_or(ConvertError::Missing)?.trim();
            parse_datetime(raw, DATE_PATTERN, 10, TIME_DIGITS).map(|value| FieldValue::DateTime {
                value,
                digits: TIME_DIGITS,
            })
        },
        |value| match value {
            Some(FieldValue::DateTime { value, digits }) => Ok(format!(
                "{} {}",
                value.format(DATE_PATTERN),
                clock(&value.time(), *digits)
            )),
            Some(other) => Err(ConvertError::WrongKind {
                expected: "datetime",
                found: other.kind(),
            }),
            None => Err(ConvertError::Missing),
        },
    )
}

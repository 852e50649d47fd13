//! Tab-separated output encoding:
//! `DATE\tTIME\tLEVEL\tCALLING_METHOD\tMESSAGE`.
//!
//! Dates are written `dd-MM-yyyy`, times at the precision they were read
//! with, levels in short form, and a missing calling method as `DEFAULT`.

use crate::error::{ConvertError, FormatError};
use crate::format::Format;
use crate::part::{Part, PartSet, PartType};
use crate::value::{clock, FieldValue};

use super::level::{level_part, LevelForm};
use super::temporal::{parse_clock_any, parse_date};

pub const SEPARATOR: char = '\t';

pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const LEVEL: &str = "level";
pub const CALLING_METHOD: &str = "calling_method";
pub const MESSAGE: &str = "message";

/// Written in place of an absent calling method.
pub const DEFAULT_METHOD: &str = "DEFAULT";

const DATE_PATTERN: &str = "%d-%m-%Y";

pub fn tabbed_format() -> Result<Format, FormatError> {
    let parts = PartSet::builder()
        .part(DATE, date_part())
        .part(TIME, time_part())
        .part(LEVEL, level_part(LevelForm::Short))
        .part(CALLING_METHOD, method_part())
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
            Some(FieldValue::DateTime { value, .. }) => Ok(value.format(DATE_PATTERN).to_string()),
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
            parse_clock_any(raw).map(|(value, digits)| FieldValue::Time { value, digits })
        },
        |value| match value {
            Some(FieldValue::Time { value, digits }) => Ok(clock(value, *digits)),
            Some(FieldValue::DateTime { value, digits }) => Ok(clock(&value.time(), *digits)),
            Some(other) => Err(ConvertError::WrongKind {
                expected: "time",
                found: other.kind(),
            }),
            None => Err(ConvertError::Missing),
        },
    )
}

fn method_part() -> Part {
    Part::new(
        PartType::Text,
        |raw| match raw {
            Some(DEFAULT_METHOD) | None => Ok(FieldValue::Null),
            Some(s) => Ok(FieldValue::text(s)),
        },
        |value| match value {
            Some(FieldValue::Text(s)) => Ok(s.clone()),
            Some(FieldValue::Null) | None => Ok(DEFAULT_METHOD.to_string()),
            Some(other) => Err(ConvertError::WrongKind {
                expected: "text",
                found: other.kind(),
            }),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::formats::LogLevel;
    use crate::render::LineFormatter;
    use chrono::{NaiveDate, NaiveTime};

    fn entry(method: FieldValue) -> Entry {
        Entry::from_pairs(
            tabbed_format().unwrap(),
            [
                (DATE, FieldValue::Date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())),
                (
                    TIME,
                    FieldValue::Time {
                        value: NaiveTime::from_hms_milli_opt(15, 14, 49, 523).unwrap(),
                        digits: 3,
                    },
                ),
                (LEVEL, FieldValue::custom(LogLevel::Warn)),
                (CALLING_METHOD, method),
                (MESSAGE, FieldValue::text("disk low")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_render_with_default_method() {
        let line = LineFormatter.format(&entry(FieldValue::Null)).unwrap();
        assert_eq!(line, "10-03-2025\t15:14:49.523\tWARN\tDEFAULT\tdisk low");
    }

    #[test]
    fn test_render_with_method() {
        let line = LineFormatter.format(&entry(FieldValue::text("Disk.Check"))).unwrap();
        assert_eq!(line, "10-03-2025\t15:14:49.523\tWARN\tDisk.Check\tdisk low");
    }

    #[test]
    fn test_reads_back_what_it_writes() {
        let format = tabbed_format().unwrap();
        for method in [FieldValue::Null, FieldValue::text("Disk.Check")] {
            let original = entry(method);
            let line = LineFormatter.format(&original).unwrap();
            let values = format.try_parse(&line).unwrap();
            let reread = Entry::new(format.clone(), values).unwrap();
            assert_eq!(reread, original);
        }
    }
}

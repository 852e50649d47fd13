use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;
use crate::part::{Part, PartType};
use crate::value::FieldValue;

/// Severity vocabulary shared by the bundled encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Short form, used by the output encoding.
    pub fn short(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    pub fn long(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFORMATION",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConvertError;

    /// Case-insensitive over short and long forms; surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LogLevel::ALL
            .into_iter()
            .find(|l| l.short().eq_ignore_ascii_case(wanted) || l.long().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::invalid(s, "log level"))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

/// Which spelling a level part writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelForm {
    Short,
    Long,
}

/// Part storing a [`LogLevel`] as a custom value.
pub fn level_part(form: LevelForm) -> Part {
    Part::new(
        PartType::Other,
        |raw| {
            let raw = raw.ok_or(ConvertError::Missing)?;
            raw.parse::<LogLevel>().map(FieldValue::custom)
        },
        move |value| {
            let level = value
                .and_then(|v| v.as_custom::<LogLevel>())
                .ok_or(ConvertError::WrongKind {
                    expected: "log level",
                    found: value.map(FieldValue::kind).unwrap_or("nothing"),
                })?;
            Ok(match form {
                LevelForm::Short => level.short(),
                LevelForm::Long => level.long(),
            }
            .to_string())
        },
    )
}

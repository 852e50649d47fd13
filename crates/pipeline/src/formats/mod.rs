//! Bundled line encodings and the transform map that unifies them.
//!
//! - `dotted.rs`: `DATE TIME LEVEL MESSAGE`, space separated
//! - `piped.rs`: `DATETIME|LEVEL|THREAD_ID|CALLING_METHOD|MESSAGE`
//! - `tabbed.rs`: the tab-separated output encoding
//! - `level.rs`: the shared severity vocabulary
//! - `temporal.rs`: strict date/time readers

pub mod dotted;
pub mod level;
pub mod piped;
pub mod tabbed;
pub mod temporal;

use crate::entry::Entry;
use crate::error::{BoxError, BuildError, FormatError};
use crate::format::Format;
use crate::transform::TransformMap;
use crate::value::FieldValue;

pub use dotted::dotted_format;
pub use level::{level_part, LevelForm, LogLevel};
pub use piped::piped_format;
pub use tabbed::tabbed_format;

/// Input encodings in the order a parser should try them.
pub fn input_formats() -> Result<Vec<Format>, FormatError> {
    Ok(vec![dotted_format()?, piped_format()?])
}

/// Transform map from every bundled input encoding to the tabbed output.
pub fn default_transform_map() -> Result<TransformMap, BuildError> {
    let output = tabbed_format()?;

    let from_dotted = output.clone();
    let from_piped = output.clone();

    let map = TransformMap::builder(output)
        .route(dotted_format()?, move |entry| dotted_to_tabbed(entry, &from_dotted))?
        .route(piped_format()?, move |entry| piped_to_tabbed(entry, &from_piped))?
        .build()?;

    Ok(map)
}

fn dotted_to_tabbed(entry: &Entry, output: &Format) -> Result<Entry, BoxError> {
    let time = required(entry, dotted::TIME)?;
    let level = required(entry, dotted::LEVEL)?;

    let out = Entry::from_pairs(
        output.clone(),
        [
            (tabbed::DATE, FieldValue::Date(entry.get_date(dotted::DATE)?)),
            (tabbed::TIME, time),
            (tabbed::LEVEL, level),
            (tabbed::CALLING_METHOD, FieldValue::Null),
            (tabbed::MESSAGE, FieldValue::Text(entry.get_string(dotted::MESSAGE)?)),
        ],
    )?;
    Ok(out)
}

fn piped_to_tabbed(entry: &Entry, output: &Format) -> Result<Entry, BoxError> {
    let (stamp, digits) = match entry.raw(piped::DATETIME) {
        Some(FieldValue::DateTime { value, digits }) => (*value, *digits),
        _ => return Err(format!("{} is not a datetime", piped::DATETIME).into()),
    };
    let level = required(entry, piped::LEVEL)?;

    let out = Entry::from_pairs(
        output.clone(),
        [
            (tabbed::DATE, FieldValue::Date(stamp.date())),
            (
                tabbed::TIME,
                FieldValue::Time {
                    value: stamp.time(),
                    digits,
                },
            ),
            (tabbed::LEVEL, level),
            (
                tabbed::CALLING_METHOD,
                FieldValue::Text(entry.get_string(piped::CALLING_METHOD)?),
            ),
            (tabbed::MESSAGE, FieldValue::Text(entry.get_string(piped::MESSAGE)?)),
        ],
    )?;
    Ok(out)
}

fn required(entry: &Entry, name: &str) -> Result<FieldValue, BoxError> {
    entry
        .raw(name)
        .cloned()
        .ok_or_else(|| format!("missing field {}", name).into())
}

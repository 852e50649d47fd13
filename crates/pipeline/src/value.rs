//! Field values held by an [`Entry`](crate::entry::Entry).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// A value type that does not fit the built-in kinds (e.g. a log level).
///
/// Implemented for every `'static + Debug + Display + Send + Sync` type.
pub trait CustomValue: Any + fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> CustomValue for T
where
    T: Any + fmt::Debug + fmt::Display + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One typed field value.
///
/// Temporal values remember how many fractional-second digits they were
/// read with (`digits`, 0..=9) so they can be written back at the same
/// precision.
#[derive(Clone)]
pub enum FieldValue {
    Null,
    DateTime { value: NaiveDateTime, digits: u8 },
    Date(NaiveDate),
    Time { value: NaiveTime, digits: u8 },
    Integer(i64),
    Float(f64),
    Text(String),
    Other(Arc<dyn CustomValue>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn custom<T: CustomValue>(value: T) -> Self {
        FieldValue::Other(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Short name of the stored kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::DateTime { .. } => "datetime",
            FieldValue::Date(_) => "date",
            FieldValue::Time { .. } => "time",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Other(_) => "custom",
        }
    }

    /// Downcast a custom value to `T`.
    pub fn as_custom<T: Any>(&self) -> Option<&T> {
        match self {
            FieldValue::Other(v) => (**v).as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => true,
            (DateTime { value: a, digits: x }, DateTime { value: b, digits: y }) => a == b && x == y,
            (Date(a), Date(b)) => a == b,
            (Time { value: a, digits: x }, Time { value: b, digits: y }) => a == b && x == y,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Other(a), Other(b)) => {
                Any::type_id((**a).as_any()) == Any::type_id((**b).as_any()) && a.to_string() == b.to_string()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::DateTime { value, digits } => write!(f, "DateTime({}, {})", value, digits),
            FieldValue::Date(d) => write!(f, "Date({})", d),
            FieldValue::Time { value, digits } => write!(f, "Time({}, {})", value, digits),
            FieldValue::Integer(i) => write!(f, "Integer({})", i),
            FieldValue::Float(x) => write!(f, "Float({})", x),
            FieldValue::Text(s) => write!(f, "Text({:?})", s),
            FieldValue::Other(v) => write!(f, "Other({:?})", v),
        }
    }
}

/// Natural text form; temporal values use ISO ordering at their own precision.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::DateTime { value, digits } => {
                write!(f, "{} {}", value.format("%Y-%m-%d"), clock(&value.time(), *digits))
            }
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Time { value, digits } => f.write_str(&clock(value, *digits)),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Float(x) => serializer.serialize_f64(*x),
            FieldValue::Text(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}

/// `HH:MM:SS` followed by `digits` fractional-second digits (truncated).
pub fn clock(time: &NaiveTime, digits: u8) -> String {
    let base = time.format("%H:%M:%S").to_string();
    let digits = digits.min(9);
    if digits == 0 {
        return base;
    }
    let nanos = time.nanosecond() % 1_000_000_000;
    let scaled = nanos / 10u32.pow(9 - digits as u32);
    format!("{}.{:0width$}", base, scaled, width = digits as usize)
}

/// Conversion out of a [`FieldValue`] for the typed getter on `Entry`.
pub trait FromFieldValue: Sized {
    /// Name used in "bad cast" diagnostics.
    const EXPECTED: &'static str;

    fn from_field(value: &FieldValue) -> Option<Self>;
}

impl FromFieldValue for String {
    const EXPECTED: &'static str = "text";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromFieldValue for i32 {
    const EXPECTED: &'static str = "32-bit integer";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromFieldValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl FromFieldValue for f32 {
    const EXPECTED: &'static str = "single-precision float";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(x) => Some(*x as f32),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveDateTime {
    const EXPECTED: &'static str = "datetime";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::DateTime { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveDate {
    const EXPECTED: &'static str = "date";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Date(d) => Some(*d),
            FieldValue::DateTime { value, .. } => Some(value.date()),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveTime {
    const EXPECTED: &'static str = "time";

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Time { value, .. } => Some(*value),
            FieldValue::DateTime { value, .. } => Some(value.time()),
            _ => None,
        }
    }
}

impl FromFieldValue for FieldValue {
    const EXPECTED: &'static str = "any";

    fn from_field(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }
}

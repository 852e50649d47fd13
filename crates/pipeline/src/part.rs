//! Parts: the named, typed fields a [`Format`](crate::format::Format) is made of.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{ConvertError, FormatError};
use crate::invoke::SafeFn;
use crate::value::FieldValue;

/// Declared semantic type of a part. Metadata only: the part's parser decides
/// what value is actually stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartType {
    DateTime,
    Integer,
    Float,
    Text,
    Other,
}

impl PartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::DateTime => "datetime",
            PartType::Integer => "integer",
            PartType::Float => "float",
            PartType::Text => "text",
            PartType::Other => "other",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field description: declared type, string → value, value → string.
///
/// Parts are stateless and cheap to clone, so one part can serve many formats.
#[derive(Debug, Clone)]
pub struct Part {
    part_type: PartType,
    parser: SafeFn<str, FieldValue>,
    formatter: SafeFn<FieldValue, String>,
}

impl Part {
    pub fn new<P, F>(part_type: PartType, parser: P, formatter: F) -> Self
    where
        P: Fn(Option<&str>) -> Result<FieldValue, ConvertError> + Send + Sync + 'static,
        F: Fn(Option<&FieldValue>) -> Result<String, ConvertError> + Send + Sync + 'static,
    {
        Self {
            part_type,
            parser: SafeFn::new(parser),
            formatter: SafeFn::new(formatter),
        }
    }

    /// Text part that stores the raw string and writes it back unchanged.
    /// A missing input is rejected; a null value formats as an empty string.
    pub fn text() -> Self {
        Part::new(
            PartType::Text,
            |raw| raw.map(FieldValue::text).ok_or(ConvertError::Missing),
            |value| match value {
                Some(FieldValue::Text(s)) => Ok(s.clone()),
                Some(FieldValue::Null) | None => Ok(String::new()),
                Some(other) => Err(ConvertError::WrongKind {
                    expected: "text",
                    found: other.kind(),
                }),
            },
        )
    }

    /// Same as [`Part::text`] but trims surrounding whitespace on the way in.
    pub fn trimmed_text() -> Self {
        let plain = Part::text();
        Part {
            parser: SafeFn::new(|raw: Option<&str>| {
                raw.map(|s| FieldValue::text(s.trim())).ok_or(ConvertError::Missing)
            }),
            ..plain
        }
    }

    /// Signed integer part.
    pub fn integer() -> Self {
        Part::new(
            PartType::Integer,
            |raw| {
                let raw = raw.ok_or(ConvertError::Missing)?.trim();
                raw.parse::<i64>()
                    .map(FieldValue::Integer)
                    .map_err(|_| ConvertError::invalid(raw, "integer"))
            },
            |value| match value {
                Some(FieldValue::Integer(i)) => Ok(i.to_string()),
                Some(other) => Err(ConvertError::WrongKind {
                    expected: "integer",
                    found: other.kind(),
                }),
                None => Err(ConvertError::Missing),
            },
        )
    }

    /// Floating point part.
    pub fn float() -> Self {
        Part::new(
            PartType::Float,
            |raw| {
                let raw = raw.ok_or(ConvertError::Missing)?.trim();
                raw.parse::<f64>()
                    .map(FieldValue::Float)
                    .map_err(|_| ConvertError::invalid(raw, "float"))
            },
            |value| match value {
                Some(FieldValue::Float(x)) => Ok(x.to_string()),
                Some(other) => Err(ConvertError::WrongKind {
                    expected: "float",
                    found: other.kind(),
                }),
                None => Err(ConvertError::Missing),
            },
        )
    }

    pub fn part_type(&self) -> PartType {
        self.part_type
    }

    /// Convert raw text into a value; `None` if the conversion faulted.
    pub fn parse(&self, raw: Option<&str>) -> Option<FieldValue> {
        self.parser.invoke(raw)
    }

    /// Convert a value into text; `None` if the conversion faulted.
    pub fn format(&self, value: Option<&FieldValue>) -> Option<String> {
        self.formatter.invoke(value)
    }
}

/// Ordered, name-unique parts. Built once through [`PartSetBuilder`].
#[derive(Debug, Clone)]
pub struct PartSet {
    names: Vec<String>,
    parts: HashMap<String, Part>,
}

impl PartSet {
    pub fn builder() -> PartSetBuilder {
        PartSetBuilder::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Part, FormatError> {
        self.parts
            .get(name)
            .ok_or_else(|| FormatError::PartNotFound(name.to_string()))
    }

    /// `(name, part)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Part)> + '_ {
        self.names
            .iter()
            .filter_map(move |n| self.parts.get(n).map(|p| (n.as_str(), p)))
    }
}

/// Accumulates parts in order; validation happens once in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct PartSetBuilder {
    entries: Vec<(String, Part)>,
}

impl PartSetBuilder {
    pub fn part(mut self, name: impl Into<String>, part: Part) -> Self {
        self.entries.push((name.into(), part));
        self
    }

    pub fn build(self) -> Result<PartSet, FormatError> {
        if self.entries.is_empty() {
            return Err(FormatError::EmptyPartSet);
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        let mut names = Vec::with_capacity(self.entries.len());
        let mut parts = HashMap::with_capacity(self.entries.len());

        for (name, part) in self.entries {
            if name.is_empty() {
                return Err(FormatError::EmptyPartName);
            }
            if !seen.insert(name.clone()) {
                return Err(FormatError::DuplicatePart(name));
            }
            names.push(name.clone());
            parts.insert(name, part);
        }

        Ok(PartSet { names, parts })
    }
}

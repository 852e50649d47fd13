//! Line formats.
//!
//! A format is an ordered [`PartSet`], a separator character and a way of
//! pulling one raw string per part out of a line. Two strategies ship here:
//!
//! - `delimited.rs`: split on the separator, optionally quote-aware
//! - `pattern.rs`: regex named capture groups, one per part
//!
//! Anything else can implement [`LineFormat`] and be wrapped in a [`Format`].
//!
//! # Equality
//!
//! [`Format`] compares and hashes by its [`Shape`] (separator, ordered part
//! names with declared types, strategy state), never by identity. Two formats
//! built independently from the same description are the same map key.

pub mod delimited;
pub mod pattern;

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::FormatError;
use crate::part::{Part, PartSet, PartType};
use crate::value::FieldValue;

pub use self::delimited::DelimitedFormat;
pub use self::pattern::RegexFormat;

/// Parsed values keyed by part name.
pub type FieldMap = HashMap<String, FieldValue>;

/// Strategy-specific state that takes part in format equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    Delimited { quoted: bool },
    Regex { pattern: String },
    /// For user strategies: a kind name plus whatever state distinguishes instances.
    Custom { kind: String, state: String },
}

/// The ordered component list a format is compared and hashed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    pub separator: char,
    pub parts: Vec<(String, PartType)>,
    pub variant: Variant,
}

impl Shape {
    fn of(format: &dyn LineFormat) -> Self {
        Self {
            separator: format.separator(),
            parts: format
                .parts()
                .iter()
                .map(|(name, part)| (name.to_string(), part.part_type()))
                .collect(),
            variant: format.variant(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Variant::Delimited { quoted: false } => f.write_str("delimited")?,
            Variant::Delimited { quoted: true } => f.write_str("quoted-delimited")?,
            Variant::Regex { pattern } => write!(f, "regex /{}/", pattern)?,
            Variant::Custom { kind, .. } => f.write_str(kind)?,
        }
        write!(f, " {:?} [", self.separator)?;
        for (i, (name, ty)) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", name, ty)?;
        }
        f.write_str("]")
    }
}

/// A line format strategy.
pub trait LineFormat: Send + Sync {
    /// Character used both to split input and to join rendered output.
    fn separator(&self) -> char;

    fn parts(&self) -> &PartSet;

    fn variant(&self) -> Variant;

    /// One value per part, or `None` if the line does not fit this format.
    fn try_parse(&self, line: &str) -> Option<FieldMap>;
}

/// Shared handle to a [`LineFormat`] with structural equality.
#[derive(Clone)]
pub struct Format {
    inner: Arc<dyn LineFormat>,
    shape: Arc<Shape>,
}

impl Format {
    pub fn new<F: LineFormat + 'static>(format: F) -> Self {
        let shape = Shape::of(&format);
        Self {
            inner: Arc::new(format),
            shape: Arc::new(shape),
        }
    }

    pub fn delimited(separator: char, parts: PartSet) -> Self {
        Format::new(DelimitedFormat::new(separator, parts, false))
    }

    pub fn quoted(separator: char, parts: PartSet) -> Self {
        Format::new(DelimitedFormat::new(separator, parts, true))
    }

    pub fn regex(separator: char, pattern: &str, parts: PartSet) -> Result<Self, FormatError> {
        Ok(Format::new(RegexFormat::new(separator, pattern, parts)?))
    }

    pub fn separator(&self) -> char {
        self.shape.separator
    }

    pub fn part_names(&self) -> &[String] {
        self.inner.parts().names()
    }

    pub fn parts(&self) -> &PartSet {
        self.inner.parts()
    }

    pub fn part(&self, name: &str) -> Result<&Part, FormatError> {
        self.inner.parts().get(name)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn try_parse(&self, line: &str) -> Option<FieldMap> {
        self.inner.try_parse(line)
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shape, &other.shape) || self.shape == other.shape
    }
}

impl Eq for Format {}

impl Hash for Format {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Format").field(&*self.shape).finish()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.shape, f)
    }
}

/// Run each raw field through its part's parser, in declared order.
/// The first failing part fails the whole line.
pub(crate) fn convert_fields<'a, I>(parts: &PartSet, raws: I) -> Option<FieldMap>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut fields = FieldMap::with_capacity(parts.len());
    for ((name, part), raw) in parts.iter().zip(raws) {
        let value = part.parse(raw)?;
        fields.insert(name.to_string(), value);
    }
    (fields.len() == parts.len()).then_some(fields)
}

use thiserror::Error;

use crate::part::PartType;

/// Error type user transform functions may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Maximum number of characters of an offending line embedded in a
/// [`ParseError::NoFormatMatched`] message.
pub const SNIPPET_LIMIT: usize = 100;

/// Marker appended to a snippet that was cut at [`SNIPPET_LIMIT`].
pub const ELLIPSIS: &str = "...";

/// Error returned by user-supplied part conversions.
///
/// These never escape a parse or format call; the safe-invocation boundary
/// turns them into a plain failure of the containing operation.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Value is missing")]
    Missing,

    #[error("Cannot read {input:?} as {expected}")]
    Invalid { input: String, expected: &'static str },

    #[error("Expected a {expected} value, got {found}")]
    WrongKind { expected: &'static str, found: &'static str },

    #[error("{0}")]
    Other(String),
}

impl ConvertError {
    pub fn invalid(input: &str, expected: &'static str) -> Self {
        ConvertError::Invalid {
            input: input.to_string(),
            expected,
        }
    }
}

/// Construction and lookup errors for parts and formats.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Duplicate part name: {0}")]
    DuplicatePart(String),

    #[error("Part names must not be empty")]
    EmptyPartName,

    #[error("A part set needs at least one part")]
    EmptyPartSet,

    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    #[error("Capture groups {groups:?} do not match part names {parts:?}")]
    CaptureMismatch { groups: Vec<String>, parts: Vec<String> },

    #[error("A parser needs at least one candidate format")]
    NoFormats,
}

/// Errors raised while building or reading an [`Entry`](crate::entry::Entry).
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Format expects {expected} values, got {actual}")]
    ValueCount { expected: usize, actual: usize },

    #[error("Value for unknown part: {0}")]
    UnknownPart(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Field {field} holds a {found} value, cannot read it as {expected}")]
    BadCast {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field {field} is declared {declared}, not {expected}")]
    DeclaredType {
        field: String,
        declared: PartType,
        expected: PartType,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("No format matched line: {0}")]
    NoFormatMatched(String),
}

impl ParseError {
    /// Build a [`ParseError::NoFormatMatched`] carrying a bounded snippet of `line`.
    pub fn no_match(line: &str) -> Self {
        ParseError::NoFormatMatched(snippet(line))
    }
}

/// First [`SNIPPET_LIMIT`] characters of `line`, plus [`ELLIPSIS`] when cut.
pub fn snippet(line: &str) -> String {
    match line.char_indices().nth(SNIPPET_LIMIT) {
        Some((cut, _)) => format!("{}{}", &line[..cut], ELLIPSIS),
        None => line.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Format mismatch: expected {expected}, got {actual}")]
    FormatMismatch { expected: String, actual: String },

    #[error("Format not registered: {0}")]
    NotRegistered(String),

    #[error("Format already registered: {0}")]
    DuplicateFormat(String),

    #[error("A transform map needs at least one registered format")]
    EmptyMap,

    #[error("Transform function failed: {0}")]
    Function(#[source] BoxError),

    #[error("Transform failed unexpectedly")]
    Failed,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Format failed")]
    FormatFailed,
}

/// Failure while assembling formats, parsers or transform maps at startup.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Any failure of the parse → transform → render chain for one line.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

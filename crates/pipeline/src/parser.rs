use tracing::debug;

use crate::entry::Entry;
use crate::error::{snippet, FormatError, ParseError};
use crate::format::Format;

/// Tries candidate formats in registration order; the first that accepts a
/// line wins, even if a later one would accept it too.
#[derive(Debug, Clone)]
pub struct LineParser {
    formats: Vec<Format>,
}

impl LineParser {
    pub fn new(formats: Vec<Format>) -> Result<Self, FormatError> {
        if formats.is_empty() {
            return Err(FormatError::NoFormats);
        }
        Ok(Self { formats })
    }

    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    pub fn parse(&self, line: &str) -> Result<Entry, ParseError> {
        if line.is_empty() {
            return Err(ParseError::InvalidArgument("line must not be empty"));
        }

        for format in &self.formats {
            if let Some(values) = format.try_parse(line) {
                // try_parse yields exactly one value per part, so this only
                // fails for a LineFormat that breaks that contract
                match Entry::new(format.clone(), values) {
                    Ok(entry) => return Ok(entry),
                    Err(err) => debug!("Format {} produced an invalid entry: {}", format, err),
                }
            }
        }

        debug!("No format matched line: {}", snippet(line));
        Err(ParseError::no_match(line))
    }

    /// Non-failing variant of [`parse`](Self::parse).
    pub fn try_parse(&self, line: &str) -> Option<Entry> {
        self.parse(line).ok()
    }
}

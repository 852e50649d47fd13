use std::collections::BTreeSet;

use ::regex::Regex;

use super::{convert_fields, FieldMap, LineFormat, Variant};
use crate::error::FormatError;
use crate::part::PartSet;

/// Format that extracts parts through named capture groups.
///
/// The pattern is compiled once, anchored to the whole line. Its named groups
/// must be exactly the part names. A group that did not take part in the
/// match hands `None` to its part's parser.
#[derive(Debug, Clone)]
pub struct RegexFormat {
    separator: char,
    parts: PartSet,
    pattern: String,
    regex: Regex,
}

impl RegexFormat {
    pub fn new(separator: char, pattern: &str, parts: PartSet) -> Result<Self, FormatError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| FormatError::InvalidPattern(e.to_string()))?;

        let groups: Vec<String> = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        let group_set: BTreeSet<&str> = groups.iter().map(String::as_str).collect();
        let part_set: BTreeSet<&str> = parts.names().iter().map(String::as_str).collect();

        if groups.len() != parts.len() || group_set != part_set {
            return Err(FormatError::CaptureMismatch {
                groups,
                parts: parts.names().to_vec(),
            });
        }

        Ok(Self {
            separator,
            parts,
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl LineFormat for RegexFormat {
    fn separator(&self) -> char {
        self.separator
    }

    fn parts(&self) -> &PartSet {
        &self.parts
    }

    fn variant(&self) -> Variant {
        Variant::Regex {
            pattern: self.pattern.clone(),
        }
    }

    fn try_parse(&self, line: &str) -> Option<FieldMap> {
        let caps = self.regex.captures(line)?;
        let raws = self
            .parts
            .names()
            .iter()
            .map(|name| caps.name(name).map(|m| m.as_str()));
        convert_fields(&self.parts, raws)
    }
}

use super::{convert_fields, FieldMap, LineFormat, Variant};
use crate::part::PartSet;

/// Separator-split format.
///
/// Plain mode splits into at most as many fields as there are parts, so the
/// last field keeps any further separators. Quoted mode walks the whole line
/// and treats separators between `"` pairs as literal text.
#[derive(Debug, Clone)]
pub struct DelimitedFormat {
    separator: char,
    parts: PartSet,
    quoted: bool,
}

impl DelimitedFormat {
    pub fn new(separator: char, parts: PartSet, quoted: bool) -> Self {
        Self {
            separator,
            parts,
            quoted,
        }
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

impl LineFormat for DelimitedFormat {
    fn separator(&self) -> char {
        self.separator
    }

    fn parts(&self) -> &PartSet {
        &self.parts
    }

    fn variant(&self) -> Variant {
        Variant::Delimited {
            quoted: self.quoted,
        }
    }

    fn try_parse(&self, line: &str) -> Option<FieldMap> {
        if line.is_empty() {
            return None;
        }

        let expected = self.parts.len();
        let raws: Vec<String> = if self.quoted {
            split_quoted(line, self.separator)
        } else {
            line.splitn(expected, self.separator).map(str::to_string).collect()
        };

        if raws.len() != expected {
            return None;
        }

        convert_fields(&self.parts, raws.iter().map(|s| Some(s.as_str())))
    }
}

/// Split `line` on `separator`, except inside double quotes.
///
/// Quote characters toggle the state and are dropped from the output.
/// There is no escape for a literal quote; an unbalanced quote simply
/// swallows the rest of the line into the current field.
pub fn split_quoted(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == separator && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);

    fields
}

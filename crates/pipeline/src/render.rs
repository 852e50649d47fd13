use tracing::trace;

use crate::entry::Entry;
use crate::error::RenderError;

/// Renders entries back to text with each part's formatter, joined by the
/// entry format's separator. All parts render or nothing does.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormatter;

impl LineFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn try_format(&self, entry: &Entry) -> Option<String> {
        let format = entry.format();
        let mut line = String::new();

        for (i, (name, part)) in format.parts().iter().enumerate() {
            let Some(text) = part.format(entry.raw(name)) else {
                trace!("Part {} failed to render", name);
                return None;
            };
            if i > 0 {
                line.push(format.separator());
            }
            line.push_str(&text);
        }

        Some(line)
    }

    pub fn format(&self, entry: &Entry) -> Result<String, RenderError> {
        self.try_format(entry).ok_or(RenderError::FormatFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::format::Format;
    use crate::parser::LineParser;
    use crate::part::{Part, PartSet, PartType};
    use crate::value::FieldValue;

    fn identity_format(sep: char, names: &[&str]) -> Format {
        let parts = names
            .iter()
            .fold(PartSet::builder(), |b, n| b.part(*n, Part::text()))
            .build()
            .unwrap();
        Format::delimited(sep, parts)
    }

    #[test]
    fn test_round_trip_with_identity_parts() {
        let format = identity_format('|', &["a", "b", "c"]);
        let parser = LineParser::new(vec![format]).unwrap();

        for line in ["x|y|z", "x||z", " a | b |c|d|e"] {
            let entry = parser.parse(line).unwrap();
            assert_eq!(LineFormatter.format(&entry).unwrap(), line);
        }
    }

    #[test]
    fn test_faulting_part_fails_whole_line() {
        let parts = PartSet::builder()
            .part("ok", Part::text())
            .part(
                "bad",
                Part::new(
                    PartType::Text,
                    |raw| raw.map(FieldValue::text).ok_or(ConvertError::Missing),
                    |_| Err(ConvertError::Other("cannot render".into())),
                ),
            )
            .build()
            .unwrap();
        let entry = Entry::from_pairs(
            Format::delimited(',', parts),
            [("ok", FieldValue::text("a")), ("bad", FieldValue::text("b"))],
        )
        .unwrap();

        assert_eq!(LineFormatter.try_format(&entry), None);
        let err = LineFormatter.format(&entry).unwrap_err();
        assert_eq!(err.to_string(), "Format failed");
    }

    #[test]
    fn test_panicking_formatter_fails_whole_line() {
        let parts = PartSet::builder()
            .part(
                "boom",
                Part::new(
                    PartType::Text,
                    |raw| raw.map(FieldValue::text).ok_or(ConvertError::Missing),
                    |_| -> Result<String, ConvertError> { panic!("formatter bug") },
                ),
            )
            .build()
            .unwrap();
        let entry =
            Entry::from_pairs(Format::delimited(',', parts), [("boom", FieldValue::text("b"))]).unwrap();
        assert!(LineFormatter.format(&entry).is_err());
    }
}

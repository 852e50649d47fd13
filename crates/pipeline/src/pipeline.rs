use crate::entry::Entry;
use crate::error::{BuildError, PipelineError};
use crate::formats;
use crate::parser::LineParser;
use crate::render::LineFormatter;
use crate::transform::{LogTransformer, TransformMap};

/// Parse → transform → render for single lines.
///
/// Built once at startup and immutable afterwards, so one instance can be
/// shared across threads freely.
#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: LineParser,
    transformer: LogTransformer,
    formatter: LineFormatter,
}

impl Pipeline {
    pub fn new(parser: LineParser, map: TransformMap) -> Self {
        Self {
            parser,
            transformer: LogTransformer::new(map),
            formatter: LineFormatter,
        }
    }

    /// The bundled encodings: dotted and piped input, tabbed output.
    pub fn standard() -> Result<Self, BuildError> {
        let parser = LineParser::new(formats::input_formats()?)?;
        Ok(Pipeline::new(parser, formats::default_transform_map()?))
    }

    pub fn parser(&self) -> &LineParser {
        &self.parser
    }

    pub fn transformer(&self) -> &LogTransformer {
        &self.transformer
    }

    /// Parse and transform, stopping before rendering.
    pub fn transform_entry(&self, line: &str) -> Result<Entry, PipelineError> {
        let entry = self.parser.parse(line)?;
        Ok(self.transformer.transform(&entry)?)
    }

    pub fn transform_line(&self, line: &str) -> Result<String, PipelineError> {
        self.transform_rendered(line).map(|(_, text)| text)
    }

    /// Full chain, keeping the transformed entry next to its rendered line.
    pub fn transform_rendered(&self, line: &str) -> Result<(Entry, String), PipelineError> {
        let entry = self.transform_entry(line)?;
        let text = self.formatter.format(&entry)?;
        Ok((entry, text))
    }

    pub fn try_transform_line(&self, line: &str) -> Option<String> {
        let entry = self.parser.try_parse(line)?;
        let out = self.transformer.try_transform(&entry)?;
        self.formatter.try_format(&out)
    }
}

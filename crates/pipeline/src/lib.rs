//! Structured log-line transformation.
//!
//! Raw lines are parsed by trying candidate [`Format`]s in order, the
//! resulting [`Entry`] is mapped onto a shared output format by a
//! [`LogTransformer`], and [`LineFormatter`] renders it back to text.
//!
//! # Architecture
//!
//! - `invoke.rs`: fault-suppressing wrapper for user conversion functions
//! - `part.rs`: typed, named fields and ordered part sets
//! - `format/`: the format abstraction and its delimited/regex strategies
//! - `entry.rs`: immutable records with typed accessors
//! - `parser.rs`: first-match parsing over candidate formats
//! - `transform/`: bound transformers and the structural transform map
//! - `render.rs`: all-or-nothing rendering
//! - `formats/`: the bundled encodings
//! - `pipeline.rs`: the parse → transform → render facade
//!
//! Everything is built once and immutable afterwards; every operation is a
//! synchronous pure function and safe to call from many threads.

pub mod entry;
pub mod error;
pub mod format;
pub mod formats;
pub mod invoke;
pub mod parser;
pub mod part;
pub mod pipeline;
pub mod render;
pub mod transform;
pub mod value;

// Re-export commonly used types
pub use entry::Entry;
pub use error::{
    BoxError, BuildError, ConvertError, EntryError, FormatError, ParseError, PipelineError,
    RenderError, TransformError,
};
pub use format::{FieldMap, Format, LineFormat, Shape, Variant};
pub use invoke::SafeFn;
pub use parser::LineParser;
pub use part::{Part, PartSet, PartSetBuilder, PartType};
pub use pipeline::Pipeline;
pub use render::LineFormatter;
pub use transform::{BoundTransformer, LogTransformer, TransformMap, TransformMapBuilder};
pub use value::{CustomValue, FieldValue, FromFieldValue};

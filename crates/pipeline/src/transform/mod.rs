//! Transformation layer: map entries from their source format onto one
//! shared output format.
//!
//! - `bound.rs`: one transform function tied to one expected input format
//! - `map.rs`: the registry of bound transformers, keyed structurally by format
//! - `transformer.rs`: the entry point that looks up and runs the right one

pub mod bound;
pub mod map;
pub mod transformer;

pub use bound::BoundTransformer;
pub use map::{TransformMap, TransformMapBuilder};
pub use transformer::LogTransformer;

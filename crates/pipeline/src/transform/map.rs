use std::collections::HashMap;

use crate::entry::Entry;
use crate::error::{BoxError, TransformError};
use crate::format::Format;

use super::bound::BoundTransformer;

/// Immutable registry: one output format, one transformer per input format.
///
/// Keys compare structurally, so a lookup with an independently built but
/// identical format finds the registered transformer.
#[derive(Debug, Clone)]
pub struct TransformMap {
    output: Format,
    transformers: HashMap<Format, BoundTransformer>,
    order: Vec<Format>,
}

impl TransformMap {
    pub fn builder(output: Format) -> TransformMapBuilder {
        TransformMapBuilder {
            output,
            transformers: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn output_format(&self) -> &Format {
        &self.output
    }

    /// Input formats in registration order.
    pub fn input_formats(&self) -> &[Format] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, format: &Format) -> bool {
        self.transformers.contains_key(format)
    }

    pub fn get(&self, format: &Format) -> Result<&BoundTransformer, TransformError> {
        self.try_get(format)
            .ok_or_else(|| TransformError::NotRegistered(format.to_string()))
    }

    pub fn try_get(&self, format: &Format) -> Option<&BoundTransformer> {
        self.transformers.get(format)
    }
}

/// Collects transformers for a [`TransformMap`]. Duplicates are rejected as
/// they are added; emptiness is checked by [`build`](Self::build).
#[derive(Debug)]
pub struct TransformMapBuilder {
    output: Format,
    transformers: HashMap<Format, BoundTransformer>,
    order: Vec<Format>,
}

impl TransformMapBuilder {
    pub fn register(mut self, transformer: BoundTransformer) -> Result<Self, TransformError> {
        let input = transformer.input_format().clone();
        if self.transformers.contains_key(&input) {
            return Err(TransformError::DuplicateFormat(input.to_string()));
        }
        self.order.push(input.clone());
        self.transformers.insert(input, transformer);
        Ok(self)
    }

    /// Shorthand for registering `BoundTransformer::new(input, func)`.
    pub fn route<F>(self, input: Format, func: F) -> Result<Self, TransformError>
    where
        F: Fn(&Entry) -> Result<Entry, BoxError> + Send + Sync + 'static,
    {
        self.register(BoundTransformer::new(input, func))
    }

    pub fn output_format(&self) -> &Format {
        &self.output
    }

    pub fn build(self) -> Result<TransformMap, TransformError> {
        if self.transformers.is_empty() {
            return Err(TransformError::EmptyMap);
        }
        Ok(TransformMap {
            output: self.output,
            transformers: self.transformers,
            order: self.order,
        })
    }
}

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::entry::Entry;
use crate::error::{BoxError, TransformError};
use crate::format::Format;
use crate::invoke::panic_message;

/// Signature of a user transform function.
pub type TransformFn = dyn Fn(&Entry) -> Result<Entry, BoxError> + Send + Sync;

/// A pure `Entry -> Entry` function that only accepts entries of one format.
#[derive(Clone)]
pub struct BoundTransformer {
    input: Format,
    func: Arc<TransformFn>,
}

impl BoundTransformer {
    pub fn new<F>(input: Format, func: F) -> Self
    where
        F: Fn(&Entry) -> Result<Entry, BoxError> + Send + Sync + 'static,
    {
        Self {
            input,
            func: Arc::new(func),
        }
    }

    pub fn input_format(&self) -> &Format {
        &self.input
    }

    /// Run the function on `entry`.
    ///
    /// Fails with [`TransformError::FormatMismatch`] before calling anything
    /// if the entry's format is not structurally equal to the expected one.
    /// A panic in the function is reported as [`TransformError::Function`].
    pub fn transform(&self, entry: &Entry) -> Result<Entry, TransformError> {
        if entry.format() != &self.input {
            return Err(TransformError::FormatMismatch {
                expected: self.input.to_string(),
                actual: entry.format().to_string(),
            });
        }

        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(entry))) {
            Ok(result) => result.map_err(TransformError::Function),
            Err(payload) => Err(TransformError::Function(
                format!("transform panicked: {}", panic_message(payload.as_ref())).into(),
            )),
        }
    }
}

impl fmt::Debug for BoundTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundTransformer")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

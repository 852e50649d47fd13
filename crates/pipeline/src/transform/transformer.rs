use tracing::debug;

use crate::entry::Entry;
use crate::error::TransformError;

use super::map::TransformMap;

/// Routes an entry to the transformer registered for its format.
#[derive(Debug, Clone)]
pub struct LogTransformer {
    map: TransformMap,
}

impl LogTransformer {
    pub fn new(map: TransformMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &TransformMap {
        &self.map
    }

    /// Transform `entry` into the map's output format.
    ///
    /// A fault in the user function surfaces as [`TransformError::Failed`]
    /// with no detail; so does a result in some other format than the
    /// map's output format.
    pub fn transform(&self, entry: &Entry) -> Result<Entry, TransformError> {
        let bound = self.map.get(entry.format())?;

        let out = match bound.transform(entry) {
            Ok(out) => out,
            Err(TransformError::Function(err)) => {
                debug!("Transform function failed: {}", err);
                return Err(TransformError::Failed);
            }
            Err(err) => return Err(err),
        };

        if out.format() != self.map.output_format() {
            debug!(
                "Transform produced {} instead of {}",
                out.format(),
                self.map.output_format()
            );
            return Err(TransformError::Failed);
        }

        Ok(out)
    }

    /// Non-failing variant of [`transform`](Self::transform).
    pub fn try_transform(&self, entry: &Entry) -> Option<Entry> {
        match self.transform(entry) {
            Ok(out) => Some(out),
            Err(err) => {
                debug!("Transform skipped: {}", err);
                None
            }
        }
    }
}

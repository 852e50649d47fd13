//! Safe invocation of user-supplied conversion functions.
//!
//! Every part parser and formatter runs behind [`SafeFn::invoke`], which
//! turns both an `Err` and a panic into `None`. Callers above this layer only
//! ever see "converted" or "did not convert".

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::ConvertError;

/// Signature of a fallible conversion from an optional `I` to `O`.
pub type ConvertFn<I, O> = dyn Fn(Option<&I>) -> Result<O, ConvertError> + Send + Sync;

/// A shareable, fault-suppressing wrapper around a conversion function.
pub struct SafeFn<I: ?Sized, O> {
    inner: Arc<ConvertFn<I, O>>,
}

impl<I: ?Sized, O> SafeFn<I, O> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&I>) -> Result<O, ConvertError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Run the wrapped function. `Some` on success, `None` on any fault.
    pub fn invoke(&self, input: Option<&I>) -> Option<O> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.inner)(input))) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                trace!("Conversion rejected input: {}", err);
                None
            }
            Err(payload) => {
                debug!("Conversion panicked: {}", panic_message(payload.as_ref()));
                None
            }
        }
    }

    /// Same as [`invoke`](Self::invoke), reported as a success flag plus a
    /// value that falls back to `O::default()`.
    pub fn try_invoke(&self, input: Option<&I>) -> (bool, O)
    where
        O: Default,
    {
        match self.invoke(input) {
            Some(value) => (true, value),
            None => (false, O::default()),
        }
    }
}

impl<I: ?Sized, O> Clone for SafeFn<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: ?Sized, O> fmt::Debug for SafeFn<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SafeFn(..)")
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_i64() -> SafeFn<str, i64> {
        SafeFn::new(|input: Option<&str>| {
            let raw = input.ok_or(ConvertError::Missing)?;
            raw.parse::<i64>()
                .map_err(|_| ConvertError::invalid(raw, "integer"))
        })
    }

    #[test]
    fn test_invoke_success() {
        assert_eq!(parse_i64().invoke(Some("42")), Some(42));
    }

    #[test]
    fn test_invoke_error_is_suppressed() {
        assert_eq!(parse_i64().invoke(Some("forty-two")), None);
        assert_eq!(parse_i64().invoke(None), None);
    }

    #[test]
    fn test_invoke_panic_is_suppressed() {
        let exploding: SafeFn<str, i64> = SafeFn::new(|_| panic!("boom"));
        assert_eq!(exploding.invoke(Some("1")), None);
    }

    #[test]
    fn test_try_invoke_falls_back_to_default() {
        assert_eq!(parse_i64().try_invoke(Some("7")), (true, 7));
        assert_eq!(parse_i64().try_invoke(Some("x")), (false, 0));
    }

    #[test]
    fn test_clone_shares_function() {
        let f = parse_i64();
        let g = f.clone();
        assert_eq!(g.invoke(Some("-3")), Some(-3));
    }
}

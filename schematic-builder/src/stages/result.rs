//! Result capture for fallible stage operations.

use crate::errors::BuilderError;
use futures::FutureExt;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// The settled outcome of one fallible operation.
///
/// Exactly one of `data` and `error` is present. Serialises to
/// `{"data": value, "error": null}` or `{"data": null, "error": reason}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult<T, E> {
    inner: Result<T, E>,
}

impl<T, E> StageResult<T, E> {
    /// Creates a successful result.
    pub fn data(value: T) -> Self {
        Self { inner: Ok(value) }
    }

    /// Creates a failed result.
    pub fn error(error: E) -> Self {
        Self { inner: Err(error) }
    }

    /// Returns true if the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    /// Returns true if the operation failed.
    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    /// Returns the success payload, if any.
    pub fn data_ref(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    /// Returns the failure payload, if any.
    pub fn error_ref(&self) -> Option<&E> {
        self.inner.as_ref().err()
    }

    /// Splits into the two fields.
    pub fn into_parts(self) -> (Option<T>, Option<E>) {
        match self.inner {
            Ok(data) => (Some(data), None),
            Err(error) => (None, Some(error)),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, E> {
        self.inner
    }
}

impl<T: Serialize, E: Serialize> Serialize for StageResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StageResult", 2)?;
        state.serialize_field("data", &self.data_ref())?;
        state.serialize_field("error", &self.error_ref())?;
        state.end()
    }
}

impl<T, E> From<Result<T, E>> for StageResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::data(value),
            Err(error) => Self::error(error),
        }
    }
}

/// Awaits `future` once and captures its outcome.
///
/// Never returns early and never re-raises the failure.
pub async fn try_catch<T, E, F>(future: F) -> StageResult<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    StageResult::from(future.await)
}

/// Like [`try_catch`], but a panic while polling `future` is captured too.
///
/// The panic payload is normalised to [`BuilderError::Panicked`] carrying
/// its message.
pub async fn try_catch_unwind<T, F>(future: F) -> StageResult<T, BuilderError>
where
    F: Future<Output = Result<T, BuilderError>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => StageResult::from(result),
        Err(payload) => StageResult::error(BuilderError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

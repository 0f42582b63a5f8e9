//! Captured operation failures
//!
//! A failed operation does not propagate its error to the caller of
//! `execute`; the failure is captured into the tracker's observable state
//! instead. [`OperationError`] is that capture: a cheaply cloneable, opaque
//! wrapper around whatever error value the operation produced. The tracker
//! never classifies the failure; callers that need the concrete type can
//! downcast.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Opaque capture of a failed operation's error value
///
/// Clones share the underlying error, so snapshots of tracker state stay
/// cheap regardless of the captured type.
#[derive(Clone)]
pub struct OperationError {
    inner: Arc<dyn StdError + Send + Sync>,
}

impl OperationError {
    /// Capture an error value
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { inner: Arc::new(error) }
    }

    /// Check whether the captured error is of type `E`
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    /// Attempt to view the captured error as a concrete type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Debug for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OperationError").field(&self.inner).finish()
    }
}

impl StdError for OperationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

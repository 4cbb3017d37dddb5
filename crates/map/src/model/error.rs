use super::{StoreError, TraversalId};
use ordo_types::{Key, RawValue};
use std::borrow::Cow;

/// Data could not be coerced into the shape an operation requires.
///
/// Raised when constructing a map from raw data that is not a structure,
/// when a recursive factory meets a child that is neither a scalar nor a
/// structure, and when a factory configuration is malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid argument: {reason}")]
pub struct InvalidArgumentError {
    reason: Cow<'static, str>,
    argument: Option<RawValue>,
}

impl InvalidArgumentError {
    /// Create an error with a reason only.
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self { reason: reason.into(), argument: None }
    }

    /// Create an error that carries the offending argument.
    pub fn with_argument(reason: impl Into<Cow<'static, str>>, argument: RawValue) -> Self {
        Self { reason: reason.into(), argument: Some(argument) }
    }

    /// Why the argument was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The rejected argument, if recorded.
    pub const fn argument(&self) -> Option<&RawValue> {
        self.argument.as_ref()
    }
}

/// A lookup named a key the map does not contain.
///
/// A key that is present with a null-like value is not "not found". Use
/// `has` to tell the two apart before calling `get`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("key not found: {key}")]
pub struct NotFoundError {
    key: Key,
}

impl NotFoundError {
    /// Create a new not-found error for `key`.
    pub const fn new(key: Key) -> Self {
        Self { key }
    }

    /// The missing key.
    pub const fn key(&self) -> &Key {
        &self.key
    }
}

/// The store failed while a traversal was advancing.
///
/// This is the only error [`Traversal::advance`] produces. It carries the
/// store's original error as its [`source`], the id of the traversal that
/// was advancing, and the position it was advancing from.
///
/// [`Traversal::advance`]: super::Traversal::advance
/// [`source`]: std::error::Error::source
#[derive(Debug, thiserror::Error)]
#[error("{traversal} failed to advance from position {position}")]
pub struct IterationError<E: StoreError> {
    traversal: TraversalId,
    position: usize,
    #[source]
    cause: E,
}

impl<E: StoreError> IterationError<E> {
    /// Wrap a store error raised by `traversal` at `position`.
    pub const fn new(traversal: TraversalId, position: usize, cause: E) -> Self {
        Self { traversal, position, cause }
    }

    /// The traversal that failed.
    pub const fn traversal(&self) -> TraversalId {
        self.traversal
    }

    /// The position the traversal was advancing from.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The store error that caused the failure.
    pub const fn cause(&self) -> &E {
        &self.cause
    }

    /// Consume the error and return the store error.
    pub fn into_cause(self) -> E {
        self.cause
    }

    /// Map the cause to a different error type, keeping the traversal and
    /// position.
    pub fn map_cause<F: StoreError>(self, f: impl FnOnce(E) -> F) -> IterationError<F> {
        IterationError { traversal: self.traversal, position: self.position, cause: f(self.cause) }
    }
}

/// Error yielded by a [`Traversal`] used as an [`Iterator`].
///
/// [`Traversal`]: super::Traversal
#[derive(Debug, thiserror::Error)]
pub enum TraverseError<E: StoreError> {
    /// The store failed to provide or rewind a cursor. Reported as the
    /// store raised it.
    #[error("failed to restart traversal: {0}")]
    Restart(#[source] E),

    /// The store failed while advancing.
    #[error(transparent)]
    Iteration(#[from] IterationError<E>),
}

impl<E: StoreError> TraverseError<E> {
    /// The underlying store error, whichever stage produced it.
    pub const fn store_error(&self) -> &E {
        match self {
            Self::Restart(e) => e,
            Self::Iteration(e) => e.cause(),
        }
    }

    /// Returns the iteration error, if advancing failed.
    pub const fn as_iteration(&self) -> Option<&IterationError<E>> {
        match self {
            Self::Iteration(e) => Some(e),
            Self::Restart(_) => None,
        }
    }
}

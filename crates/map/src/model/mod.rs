//! Store models and traits.
//!
//! The core trait is [`KvRead`], the read surface of an insertion-ordered
//! key-value store. A store hands out [`KvCursor`]s, forward-only position
//! markers over its entries. Neither trait knows about iteration snapshots
//! or error wrapping; those live in the [`traverse`] layer, which turns any
//! cursor into a restartable [`Traversal`].
//!
//! ## Layers
//!
//! ```text
//! KvRead                 ← get / has / len / cursor()
//!   └─ cursor() → KvCursor   ← rewind / step / valid / key / value
//!                  └─ IterationCursor  ← validity tracking, snapshots
//!                       └─ Traversal    ← state machine, error wrapping
//! ```
//!
//! Backends only implement [`KvRead`] and [`KvCursor`]. See [`crate::mem`]
//! for the in-memory backend.

mod error;
pub use error::{InvalidArgumentError, IterationError, NotFoundError, TraverseError};

pub mod traverse;
pub use traverse::{Iteration, IterationCursor, Traversal, TraversalId, TraversalState};

use ordo_types::Key;

/// Bound for store error types.
///
/// Blanket-implemented for every `Send + Sync + 'static` error, including
/// [`core::convert::Infallible`] for stores that cannot fail.
pub trait StoreError: std::error::Error + Send + Sync + 'static {}

impl<T> StoreError for T where T: std::error::Error + Send + Sync + 'static {}

/// Forward cursor over the entries of a store, in insertion order.
///
/// A freshly acquired cursor is positioned at the first entry, or is invalid
/// if the store is empty. Cursors never modify the store they walk.
pub trait KvCursor {
    /// The value type of the underlying store.
    type Value;

    /// Error raised while moving the cursor.
    type Error: StoreError;

    /// Move to the first entry.
    fn rewind(&mut self) -> Result<(), Self::Error>;

    /// Move one entry forward. Stepping an invalid cursor is a no-op.
    fn step(&mut self) -> Result<(), Self::Error>;

    /// True if the cursor is positioned at an entry.
    fn valid(&self) -> bool;

    /// The key at the current position, `None` past the end.
    fn key(&self) -> Option<&Key>;

    /// The value at the current position, `None` past the end.
    fn value(&self) -> Option<&Self::Value>;

    /// The entry at the current position, `None` past the end.
    fn entry(&self) -> Option<(&Key, &Self::Value)> {
        Some((self.key()?, self.value()?))
    }
}

/// Read access to an insertion-ordered key-value store.
///
/// Lookups are independent of any cursor the store has handed out.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait KvRead {
    /// The value type.
    type Value;

    /// Error type for cursor acquisition and movement.
    type Error: StoreError;

    /// The cursor type for traversing entries.
    type Cursor<'a>: KvCursor<Value = Self::Value, Error = Self::Error>
    where
        Self: 'a;

    /// Get the value stored under `key`.
    fn get(&self, key: &Key) -> Option<&Self::Value>;

    /// True if `key` is present.
    fn has(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    fn len(&self) -> usize;

    /// True if the store has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Acquire a cursor positioned at the first entry.
    fn cursor<'a>(&'a self) -> Result<Self::Cursor<'a>, Self::Error>;
}

//! Validity-tracking wrapper around store cursors.

use super::Iteration;
use crate::model::KvCursor;

/// A store cursor and its validity flag.
///
/// The flag is refreshed after every successful movement. If moving fails,
/// both the flag and the underlying position are left as the store leaves
/// them, and the caller decides what to report.
#[derive(Debug)]
pub struct IterationCursor<C> {
    inner: C,
    valid: bool,
}

impl<C: KvCursor> IterationCursor<C> {
    /// Wrap a store cursor.
    pub fn new(cursor: C) -> Self {
        let valid = cursor.valid();
        Self { inner: cursor, valid }
    }

    /// Move to the first entry. Returns whether an entry exists.
    pub fn restart(&mut self) -> Result<bool, C::Error> {
        self.inner.rewind()?;
        self.valid = self.inner.valid();
        Ok(self.valid)
    }

    /// Move one entry forward. Returns whether an entry exists afterwards.
    pub fn advance(&mut self) -> Result<bool, C::Error> {
        self.inner.step()?;
        self.valid = self.inner.valid();
        Ok(self.valid)
    }

    /// True if positioned at an entry.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Snapshot the current position, or the sentinel when invalid.
    pub fn current(&self) -> Iteration<C::Value>
    where
        C::Value: Clone,
    {
        if !self.valid {
            return Iteration::end();
        }
        match self.inner.entry() {
            Some((key, value)) => Iteration::new(key.clone(), value.clone()),
            None => Iteration::end(),
        }
    }

    /// Get a reference to the store cursor.
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Consume the wrapper and return the store cursor.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

//! The external iteration state machine.

use super::{Iteration, IterationCursor};
use crate::model::{IterationError, KvRead, TraverseError};
use core::fmt;
use ordo_types::Key;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

static NEXT_TRAVERSAL_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a [`Traversal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraversalId(u64);

impl TraversalId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_TRAVERSAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TraversalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "traversal#{}", self.0)
    }
}

/// Where a [`Traversal`] is in its lifecycle.
///
/// ```text
/// Unstarted ──restart──▶ Positioned ──advance──▶ Positioned … ──▶ Exhausted
///     │                                                              ▲
///     └──────────────restart (empty store)───────────────────────────┘
/// ```
///
/// `restart` returns to `Positioned` (or `Exhausted`) from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalState {
    /// No cursor position has been computed yet.
    Unstarted,
    /// Positioned at an entry.
    Positioned,
    /// Past the last entry.
    Exhausted,
}

/// A single traversal over a store.
///
/// Use it either through the explicit protocol ([`restart`], [`advance`],
/// [`current_key`], [`current_value`], [`current_iteration`]) or as an
/// [`Iterator`] of `(key, value)` pairs.
///
/// The store cursor is acquired lazily, on the first restart. Reading the
/// current position never moves the cursor: it returns the snapshot
/// computed by the last `restart` or `advance`. Before the first restart
/// that snapshot is the end-of-sequence sentinel.
///
/// Errors from the store while advancing are wrapped in an
/// [`IterationError`] naming this traversal. Errors while restarting are
/// the store's own and are returned unwrapped.
///
/// [`restart`]: Self::restart
/// [`advance`]: Self::advance
/// [`current_key`]: Self::current_key
/// [`current_value`]: Self::current_value
/// [`current_iteration`]: Self::current_iteration
pub struct Traversal<'a, S: KvRead + ?Sized> {
    id: TraversalId,
    store: &'a S,
    cursor: Option<IterationCursor<S::Cursor<'a>>>,
    iteration: Iteration<S::Value>,
    state: TraversalState,
    position: usize,

    // `Iterator` protocol bookkeeping
    started: bool,
    fused: bool,
}

impl<'a, S> fmt::Debug for Traversal<'a, S>
where
    S: KvRead + ?Sized + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<'a, S> Traversal<'a, S>
where
    S: KvRead + ?Sized + 'a,
    S::Value: Clone,
{
    /// Create an unstarted traversal over `store`.
    pub fn new(store: &'a S) -> Self {
        Self {
            id: TraversalId::next(),
            store,
            cursor: None,
            iteration: Iteration::end(),
            state: TraversalState::Unstarted,
            position: 0,
            started: false,
            fused: false,
        }
    }

    /// This traversal's id.
    pub const fn id(&self) -> TraversalId {
        self.id
    }

    /// The lifecycle state.
    pub const fn state(&self) -> TraversalState {
        self.state
    }

    /// Index of the current entry since the last restart. Once exhausted,
    /// the number of entries walked.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// True if positioned at an entry.
    pub const fn valid(&self) -> bool {
        self.iteration.is_valid()
    }

    /// The key at the current position, `None` at the end.
    pub const fn current_key(&self) -> Option<&Key> {
        self.iteration.key()
    }

    /// The value at the current position, `None` at the end.
    pub const fn current_value(&self) -> Option<&S::Value> {
        self.iteration.value()
    }

    /// The snapshot of the current position.
    pub const fn current_iteration(&self) -> &Iteration<S::Value> {
        &self.iteration
    }

    /// Position the traversal at the first entry, or exhaust it if the
    /// store is empty.
    ///
    /// Acquires the store cursor on first use. Failures to acquire or
    /// rewind the cursor are returned as the store raised them. A failed
    /// rewind leaves the traversal unstarted, since the store cursor may
    /// have moved.
    ///
    /// Restarting also resets the [`Iterator`] side: the next call to
    /// `next` yields the first entry again.
    pub fn restart(&mut self) -> Result<(), S::Error> {
        self.started = false;
        self.fused = false;

        let cursor = match self.cursor.take() {
            Some(cursor) => cursor,
            None => IterationCursor::new(self.store.cursor()?),
        };
        let cursor = self.cursor.insert(cursor);
        if let Err(err) = cursor.restart() {
            self.iteration = Iteration::end();
            self.position = 0;
            self.state = TraversalState::Unstarted;
            return Err(err);
        }

        self.iteration = cursor.current();
        self.position = 0;
        self.state = if self.iteration.is_valid() {
            TraversalState::Positioned
        } else {
            TraversalState::Exhausted
        };
        trace!(traversal = %self.id, state = ?self.state, "restarted");
        Ok(())
    }

    /// Move to the next entry. Returns whether the traversal is still
    /// positioned at an entry.
    ///
    /// Advancing an exhausted traversal is a no-op returning `false`.
    /// Advancing an unstarted traversal positions it at the first entry.
    /// If the store fails, the snapshot is left unchanged and the store
    /// error is returned wrapped in an [`IterationError`].
    pub fn advance(&mut self) -> Result<bool, IterationError<S::Error>> {
        match self.state {
            TraversalState::Exhausted => return Ok(false),
            TraversalState::Unstarted => {
                return self.restart().map(|()| self.valid()).map_err(|cause| self.wrap(cause));
            }
            TraversalState::Positioned => {}
        }

        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(false);
        };

        if let Err(cause) = cursor.advance() {
            return Err(self.wrap(cause));
        }

        self.iteration = cursor.current();
        self.position += 1;
        if !self.iteration.is_valid() {
            self.state = TraversalState::Exhausted;
            trace!(traversal = %self.id, entries = self.position, "exhausted");
        }
        Ok(self.iteration.is_valid())
    }

    fn wrap(&self, cause: S::Error) -> IterationError<S::Error> {
        debug!(
            traversal = %self.id,
            position = self.position,
            %cause,
            "store failed while advancing"
        );
        IterationError::new(self.id, self.position, cause)
    }
}

impl<'a, S> Iterator for Traversal<'a, S>
where
    S: KvRead + ?Sized + 'a,
    S::Value: Clone,
{
    type Item = Result<(Key, S::Value), TraverseError<S::Error>>;

    /// The first call restarts the traversal; every later call advances it.
    /// After yielding an error, or reaching the end, the iterator is fused
    /// until the next [`restart`](Self::restart).
    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        let step = if self.started {
            self.advance().map_err(TraverseError::from)
        } else {
            let step = self.restart().map(|()| self.valid()).map_err(TraverseError::Restart);
            self.started = true;
            step
        };

        match step {
            Ok(true) => self.iteration.clone().into_entry().map(Ok),
            Ok(false) => {
                self.fused = true;
                None
            }
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.fused {
            return (0, Some(0));
        }
        let consumed = if self.started { self.position + 1 } else { 0 };
        (0, Some(self.store.len().saturating_sub(consumed)))
    }
}

impl<'a, S> core::iter::FusedIterator for Traversal<'a, S>
where
    S: KvRead + ?Sized + 'a,
    S::Value: Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::MemStore;

    fn store() -> MemStore<i64> {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    #[test]
    fn unstarted_reads_are_the_sentinel() {
        let store = store();
        let traversal = Traversal::new(&store);
        assert_eq!(traversal.state(), TraversalState::Unstarted);
        assert!(!traversal.valid());
        assert_eq!(traversal.current_key(), None);
        assert_eq!(traversal.current_value(), None);
    }

    #[test]
    fn explicit_protocol_walks_in_order() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        traversal.restart().unwrap();

        let mut seen = vec![];
        while traversal.valid() {
            seen.push((traversal.current_key().cloned(), traversal.current_value().copied()));
            traversal.advance().unwrap();
        }
        assert_eq!(
            seen,
            vec![
                (Some(Key::from("a")), Some(1)),
                (Some(Key::from("b")), Some(2)),
                (Some(Key::from("c")), Some(3)),
            ]
        );
        assert_eq!(traversal.state(), TraversalState::Exhausted);
        assert_eq!(traversal.position(), 3);
        assert_eq!(traversal.current_iteration(), &Iteration::end());
    }

    #[test]
    fn reads_do_not_move_the_cursor() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        traversal.restart().unwrap();
        traversal.advance().unwrap();
        for _ in 0..3 {
            assert_eq!(traversal.current_key(), Some(&Key::from("b")));
            assert_eq!(traversal.current_value(), Some(&2));
        }
        assert_eq!(traversal.position(), 1);
    }

    #[test]
    fn advance_when_unstarted_positions_at_first() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        assert!(traversal.advance().unwrap());
        assert_eq!(traversal.current_key(), Some(&Key::from("a")));
        assert_eq!(traversal.state(), TraversalState::Positioned);
    }

    #[test]
    fn advance_when_exhausted_is_a_noop() {
        let store = MemStore::<i64>::new();
        let mut traversal = Traversal::new(&store);
        traversal.restart().unwrap();
        assert_eq!(traversal.state(), TraversalState::Exhausted);
        assert!(!traversal.advance().unwrap());
        assert!(!traversal.advance().unwrap());
        assert_eq!(traversal.position(), 0);
    }

    #[test]
    fn restart_after_partial_walk() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        traversal.restart().unwrap();
        traversal.advance().unwrap();
        traversal.advance().unwrap();
        traversal.restart().unwrap();
        assert_eq!(traversal.current_key(), Some(&Key::from("a")));
        assert_eq!(traversal.position(), 0);
    }

    #[test]
    fn iterator_restarts_once_then_fuses() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        traversal.restart().unwrap();
        traversal.advance().unwrap();

        // iterating starts clean regardless of prior manual movement
        let keys: Vec<_> = traversal.by_ref().map(|r| r.unwrap().0).collect();
        assert_eq!(keys, vec![Key::from("a"), Key::from("b"), Key::from("c")]);
        assert!(traversal.next().is_none());
    }

    #[test]
    fn restart_rearms_a_drained_iterator() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        let first: Vec<_> = traversal.by_ref().map(|r| r.unwrap().0).collect();
        assert!(traversal.next().is_none());

        traversal.restart().unwrap();
        assert!(traversal.valid());
        let second: Vec<_> = traversal.by_ref().map(|r| r.unwrap().0).collect();
        assert_eq!(first, second);
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn restart_mid_iteration_yields_first_entry_next() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        traversal.next().unwrap().unwrap();
        traversal.next().unwrap().unwrap();

        traversal.restart().unwrap();
        assert_eq!(traversal.next().unwrap().unwrap(), (Key::from("a"), 1));
        assert_eq!(traversal.next().unwrap().unwrap(), (Key::from("b"), 2));
    }

    #[test]
    fn size_hint_upper_bound_shrinks() {
        let store = store();
        let mut traversal = Traversal::new(&store);
        assert_eq!(traversal.size_hint(), (0, Some(3)));
        traversal.next();
        assert_eq!(traversal.size_hint(), (0, Some(2)));
        traversal.by_ref().for_each(drop);
        assert_eq!(traversal.size_hint(), (0, Some(0)));
    }

    #[test]
    fn ids_are_unique() {
        let store = store();
        let a = Traversal::new(&store);
        let b = Traversal::new(&store);
        assert_ne!(a.id(), b.id());
        assert!(a.id().to_string().starts_with("traversal#"));
    }
}

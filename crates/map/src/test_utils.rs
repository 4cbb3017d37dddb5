//! A store that fails on demand, for exercising error paths.

use crate::{
    mem::{MemCursor, MemStore},
    model::{KvCursor, KvRead},
};
use ordo_types::Key;
use std::cell::Cell;

/// The store operation a [`FaultError`] was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultOp {
    /// Acquiring a cursor.
    Cursor,
    /// Rewinding a cursor.
    Rewind,
    /// Stepping a cursor.
    Step,
}

/// An injected store failure.
///
/// The token is chosen by the test, so a wrapped error's cause can be
/// checked for identity with the injected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("injected {op:?} fault (token {token})")]
pub struct FaultError {
    /// Token from the [`FaultPlan`].
    pub token: u64,
    /// Operation that failed.
    pub op: FaultOp,
}

/// Which operations of a [`FaultyStore`] fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Token carried by every raised [`FaultError`].
    pub token: u64,
    /// Zero-based index of the step call that fails, counted per cursor.
    /// Only that call fails; later steps succeed.
    pub fail_step: Option<usize>,
    /// Zero-based index of the rewind call that fails, counted per cursor.
    /// Only that call fails. The failing rewind still moves the cursor to
    /// the first entry, as a partially applied rewind would.
    pub fail_rewind: Option<usize>,
    /// Acquiring a cursor fails.
    pub fail_cursor: bool,
}

impl FaultPlan {
    /// A plan that never fails.
    pub const fn none() -> Self {
        Self { token: 0, fail_step: None, fail_rewind: None, fail_cursor: false }
    }

    /// Fail the `n`-th step call.
    pub const fn step(n: usize) -> Self {
        Self { fail_step: Some(n), ..Self::none() }
    }

    /// Fail the first rewind.
    pub const fn rewind() -> Self {
        Self::rewind_at(0)
    }

    /// Fail the `n`-th rewind call.
    pub const fn rewind_at(n: usize) -> Self {
        Self { fail_rewind: Some(n), ..Self::none() }
    }

    /// Fail cursor acquisition.
    pub const fn cursor() -> Self {
        Self { fail_cursor: true, ..Self::none() }
    }

    /// Set the token.
    pub const fn with_token(mut self, token: u64) -> Self {
        self.token = token;
        self
    }

    const fn fault(&self, op: FaultOp) -> FaultError {
        FaultError { token: self.token, op }
    }
}

/// A [`MemStore`] whose cursors fail according to a [`FaultPlan`].
///
/// Lookups never fail. The store counts how many cursors it has handed out.
#[derive(Debug, Clone)]
pub struct FaultyStore<V> {
    inner: MemStore<V>,
    plan: FaultPlan,
    cursors_opened: Cell<usize>,
}

impl<V> FaultyStore<V> {
    /// Wrap `inner` with `plan`.
    pub const fn new(inner: MemStore<V>, plan: FaultPlan) -> Self {
        Self { inner, plan, cursors_opened: Cell::new(0) }
    }

    /// Build from entries.
    pub fn from_entries<K: Into<Key>>(
        entries: impl IntoIterator<Item = (K, V)>,
        plan: FaultPlan,
    ) -> Self {
        Self::new(entries.into_iter().collect(), plan)
    }

    /// The plan.
    pub const fn plan(&self) -> FaultPlan {
        self.plan
    }

    /// Number of cursors handed out so far.
    pub fn cursors_opened(&self) -> usize {
        self.cursors_opened.get()
    }
}

impl<V> KvRead for FaultyStore<V> {
    type Value = V;
    type Error = FaultError;
    type Cursor<'a>
        = FaultyCursor<'a, V>
    where
        Self: 'a;

    fn get(&self, key: &Key) -> Option<&V> {
        self.inner.get(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn cursor(&self) -> Result<FaultyCursor<'_, V>, FaultError> {
        if self.plan.fail_cursor {
            return Err(self.plan.fault(FaultOp::Cursor));
        }
        self.cursors_opened.set(self.cursors_opened.get() + 1);
        let Ok(inner) = self.inner.cursor();
        Ok(FaultyCursor { inner, plan: self.plan, steps: 0, rewinds: 0 })
    }
}

/// Cursor over a [`FaultyStore`].
#[derive(Debug)]
pub struct FaultyCursor<'a, V> {
    inner: MemCursor<'a, V>,
    plan: FaultPlan,
    steps: usize,
    rewinds: usize,
}

impl<V> KvCursor for FaultyCursor<'_, V> {
    type Value = V;
    type Error = FaultError;

    fn rewind(&mut self) -> Result<(), FaultError> {
        let n = self.rewinds;
        self.rewinds += 1;
        let Ok(()) = self.inner.rewind();
        if self.plan.fail_rewind == Some(n) {
            return Err(self.plan.fault(FaultOp::Rewind));
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), FaultError> {
        let n = self.steps;
        self.steps += 1;
        if self.plan.fail_step == Some(n) {
            return Err(self.plan.fault(FaultOp::Step));
        }
        let Ok(()) = self.inner.step();
        Ok(())
    }

    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn key(&self) -> Option<&Key> {
        self.inner.key()
    }

    fn value(&self) -> Option<&V> {
        self.inner.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Map, conformance::conformance, model::TraversalState};

    fn map(plan: FaultPlan) -> Map<FaultyStore<i64>> {
        Map::new(FaultyStore::from_entries([("a", 1), ("b", 2), ("c", 3)], plan))
    }

    #[test]
    fn faultless_store_conformance() {
        conformance(|entries| FaultyStore::from_entries(entries, FaultPlan::none()));
    }

    #[test]
    fn step_fault_is_wrapped_with_traversal_identity() {
        let map = map(FaultPlan::step(1).with_token(42));
        let mut traversal = map.traverse();
        traversal.restart().unwrap();
        assert!(traversal.advance().unwrap());

        let err = traversal.advance().unwrap_err();
        assert_eq!(err.cause(), &FaultError { token: 42, op: FaultOp::Step });
        assert_eq!(err.traversal(), traversal.id());
        assert_eq!(err.position(), 1);

        // the failed step left the snapshot alone
        assert_eq!(traversal.state(), TraversalState::Positioned);
        assert_eq!(traversal.current_key(), Some(&Key::from("b")));

        // the fault fires once, so the traversal can continue
        assert!(traversal.advance().unwrap());
        assert_eq!(traversal.current_key(), Some(&Key::from("c")));
    }

    #[test]
    fn rewind_fault_is_not_wrapped() {
        let map = map(FaultPlan::rewind().with_token(7));
        let mut traversal = map.traverse();
        assert_eq!(traversal.restart(), Err(FaultError { token: 7, op: FaultOp::Rewind }));
        assert_eq!(traversal.state(), TraversalState::Unstarted);
    }

    #[test]
    fn failed_rewind_resets_to_unstarted() {
        let map = map(FaultPlan::rewind_at(1).with_token(11));
        let mut traversal = map.traverse();
        traversal.restart().unwrap();
        traversal.advance().unwrap();
        traversal.advance().unwrap();
        assert_eq!(traversal.current_key(), Some(&Key::from("c")));

        // the cursor moves back to `a` before the rewind fails
        assert_eq!(traversal.restart(), Err(FaultError { token: 11, op: FaultOp::Rewind }));
        assert_eq!(traversal.state(), TraversalState::Unstarted);
        assert_eq!(traversal.current_key(), None);
        assert_eq!(traversal.position(), 0);

        // advancing restarts cleanly from the first entry
        assert!(traversal.advance().unwrap());
        assert_eq!(traversal.current_key(), Some(&Key::from("a")));
        assert_eq!(traversal.position(), 0);
        assert!(traversal.advance().unwrap());
        assert_eq!(traversal.current_key(), Some(&Key::from("b")));
        assert_eq!(traversal.position(), 1);
    }

    #[test]
    fn implicit_restart_fault_is_wrapped() {
        let map = map(FaultPlan::cursor().with_token(9));
        let mut traversal = map.traverse();
        let err = traversal.advance().unwrap_err();
        assert_eq!(err.into_cause(), FaultError { token: 9, op: FaultOp::Cursor });
    }

    #[test]
    fn cursor_acquired_lazily_and_once() {
        let map = map(FaultPlan::none());
        let mut traversal = map.traverse();
        assert_eq!(map.store().cursors_opened(), 0);
        traversal.restart().unwrap();
        traversal.restart().unwrap();
        assert_eq!(map.store().cursors_opened(), 1);

        let _other = map.traverse();
        assert_eq!(map.store().cursors_opened(), 1);
    }

    #[test]
    fn lookups_ignore_faults() {
        let map = map(FaultPlan { fail_cursor: true, fail_rewind: Some(0), ..FaultPlan::step(0) });
        assert_eq!(map.get("a"), Ok(&1));
        assert!(map.has("c"));
        assert_eq!(map.len(), 3);
    }
}

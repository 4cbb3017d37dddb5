//! In-memory key-value store implementation.
//!
//! Entries live in an [`IndexMap`], so traversal order is insertion order.
//! Re-inserting an existing key replaces its value and keeps its position.

use crate::model::{KvCursor, KvRead};
use core::{convert::Infallible, fmt};
use indexmap::IndexMap;
use ordo_types::Key;

type Entries<V> = IndexMap<Key, V, ahash::RandomState>;

/// An insertion-ordered in-memory store.
///
/// Cursors over a `MemStore` cannot fail, so its error type is
/// [`Infallible`].
#[derive(Clone)]
pub struct MemStore<V> {
    entries: Entries<V>,
}

impl<V: fmt::Debug> fmt::Debug for MemStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for MemStore<V> {
    /// Stores are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

impl<V> Default for MemStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemStore<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { entries: IndexMap::default() }
    }

    /// Create an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: IndexMap::with_capacity_and_hasher(capacity, Default::default()) }
    }

    /// Insert an entry, returning the previous value for `key`.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Borrowing iterator over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, V> {
        self.entries.iter()
    }

    /// Consume the store and return its entries as a plain `IndexMap`.
    pub fn into_index_map(self) -> IndexMap<Key, V> {
        self.entries.into_iter().collect()
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for MemStore<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut store = Self::with_capacity(iter.size_hint().0);
        store.extend(iter);
        store
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for MemStore<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl<V> From<IndexMap<Key, V>> for MemStore<V> {
    fn from(map: IndexMap<Key, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<V> KvRead for MemStore<V> {
    type Value = V;
    type Error = Infallible;
    type Cursor<'a>
        = MemCursor<'a, V>
    where
        Self: 'a;

    fn get(&self, key: &Key) -> Option<&V> {
        self.entries.get(key)
    }

    fn has(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn cursor(&self) -> Result<MemCursor<'_, V>, Infallible> {
        Ok(MemCursor::new(&self.entries))
    }
}

/// Cursor over a [`MemStore`].
pub struct MemCursor<'a, V> {
    entries: &'a Entries<V>,
    pos: usize,
}

impl<V> fmt::Debug for MemCursor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemCursor").field("pos", &self.pos).finish()
    }
}

impl<'a, V> MemCursor<'a, V> {
    const fn new(entries: &'a Entries<V>) -> Self {
        Self { entries, pos: 0 }
    }
}

impl<V> KvCursor for MemCursor<'_, V> {
    type Value = V;
    type Error = Infallible;

    fn rewind(&mut self) -> Result<(), Infallible> {
        self.pos = 0;
        Ok(())
    }

    fn step(&mut self) -> Result<(), Infallible> {
        if self.valid() {
            self.pos += 1;
        }
        Ok(())
    }

    fn valid(&self) -> bool {
        self.pos < self.entries.len()
    }

    fn key(&self) -> Option<&Key> {
        self.entries.get_index(self.pos).map(|(k, _)| k)
    }

    fn value(&self) -> Option<&V> {
        self.entries.get_index(self.pos).map(|(_, v)| v)
    }

    fn entry(&self) -> Option<(&Key, &V)> {
        self.entries.get_index(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance::conformance;

    #[test]
    fn mem_store_conformance() {
        conformance(|entries| entries.into_iter().collect::<MemStore<_>>());
    }

    #[test]
    fn insertion_order_survives_replacement() {
        let mut store: MemStore<i64> = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(store.insert("b", 10), Some(1));
        store.insert(7i64, 3);

        let keys: Vec<_> = store.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Key::from("b"), Key::from("a"), Key::Int(7)]);
        assert_eq!(store.get(&Key::from("b")), Some(&10));
    }

    #[test]
    fn cursor_steps_to_end_and_stays() {
        let store: MemStore<i64> = [("x", 1)].into_iter().collect();
        let mut cursor = store.cursor().unwrap();
        assert_eq!(cursor.entry(), Some((&Key::from("x"), &1)));
        cursor.step().unwrap();
        assert!(!cursor.valid());
        assert_eq!(cursor.key(), None);
        cursor.step().unwrap();
        assert!(!cursor.valid());
        cursor.rewind().unwrap();
        assert_eq!(cursor.value(), Some(&1));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a: MemStore<i64> = [("a", 1), ("b", 2)].into_iter().collect();
        let b: MemStore<i64> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn debug_lists_entries() {
        let store: MemStore<i64> = [("a", 1)].into_iter().collect();
        assert_eq!(format!("{store:?}"), r#"{Str("a"): 1}"#);
    }
}

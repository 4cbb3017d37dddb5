use crate::{
    mem::MemStore,
    model::{InvalidArgumentError, KvRead, NotFoundError, Traversal},
};
use indexmap::IndexMap;
use ordo_types::{Key, RawValue};

/// A map backed by the in-memory store.
pub type MemMap<V> = Map<MemStore<V>>;

/// A read-oriented, insertion-ordered collection over a store.
///
/// Lookups ([`get`], [`has`]) go straight to the store and are independent
/// of any traversal. Iteration happens through [`Traversal`] sessions
/// borrowed from the map; each starts clean and does not affect others.
///
/// ```
/// use ordo_map::MemMap;
///
/// let map: MemMap<u32> = [("k1", 1)].into_iter().collect();
/// assert!(map.has("k1"));
/// assert!(map.get("k2").is_err());
/// ```
///
/// [`get`]: Self::get
/// [`has`]: Self::has
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map<S> {
    store: S,
}

impl<S> Map<S> {
    /// Adopt an existing store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the map and return the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KvRead> Map<S> {
    /// Get the value stored under `key`.
    ///
    /// A key that is present with a null-like value is returned as that
    /// value; only an absent key fails.
    pub fn get(&self, key: impl Into<Key>) -> Result<&S::Value, NotFoundError> {
        let key = key.into();
        self.store.get(&key).ok_or_else(|| NotFoundError::new(key))
    }

    /// True if `key` is present.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.store.has(&key.into())
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<S> Map<S>
where
    S: KvRead,
    S::Value: Clone,
{
    /// Start a new, unstarted traversal.
    pub fn traverse(&self) -> Traversal<'_, S> {
        Traversal::new(&self.store)
    }

    /// Iterate over `(key, value)` pairs.
    ///
    /// Equivalent to [`traverse`](Self::traverse), named for use as a Rust
    /// iterator.
    pub fn iter(&self) -> Traversal<'_, S> {
        self.traverse()
    }
}

impl<'a, S> IntoIterator for &'a Map<S>
where
    S: KvRead,
    S::Value: Clone,
{
    type Item = <Traversal<'a, S> as Iterator>::Item;
    type IntoIter = Traversal<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

impl MemMap<RawValue> {
    /// Build a map from raw data, verbatim.
    ///
    /// Maps keep their keys, lists are keyed by position. Children are
    /// stored as-is, no recursion happens. Any other raw value is rejected.
    pub fn from_raw(raw: RawValue) -> Result<Self, InvalidArgumentError> {
        match raw.into_map() {
            Ok(entries) => Ok(entries.into()),
            Err(other) => {
                Err(InvalidArgumentError::with_argument("data is not a map or a list", other))
            }
        }
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for MemMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<V> From<IndexMap<Key, V>> for MemMap<V> {
    fn from(map: IndexMap<Key, V>) -> Self {
        Self::new(map.into())
    }
}

impl<V> From<MemStore<V>> for MemMap<V> {
    fn from(store: MemStore<V>) -> Self {
        Self::new(store)
    }
}

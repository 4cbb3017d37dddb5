use ordo_types::Key;

/// A snapshot of one traversal position.
///
/// A `None` key is the end-of-sequence sentinel. Only the key carries that
/// meaning: a present entry whose value type models "null" is still a
/// valid position.
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration<V> {
    key: Option<Key>,
    value: Option<V>,
}

impl<V> Default for Iteration<V> {
    fn default() -> Self {
        Self::end()
    }
}

impl<V> Iteration<V> {
    /// A snapshot of a present entry.
    pub const fn new(key: Key, value: V) -> Self {
        Self { key: Some(key), value: Some(value) }
    }

    /// The end-of-sequence sentinel.
    pub const fn end() -> Self {
        Self { key: None, value: None }
    }

    /// The key, `None` at the end of the sequence.
    pub const fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// The value, `None` at the end of the sequence.
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// True unless this is the end-of-sequence sentinel.
    pub const fn is_valid(&self) -> bool {
        self.key.is_some()
    }

    /// Split into key and value.
    pub fn into_parts(self) -> (Option<Key>, Option<V>) {
        (self.key, self.value)
    }

    /// The entry, or `None` for the sentinel.
    pub fn into_entry(self) -> Option<(Key, V)> {
        self.key.zip(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_invalid() {
        let end = Iteration::<u8>::end();
        assert!(!end.is_valid());
        assert_eq!(end.key(), None);
        assert_eq!(end.value(), None);
        assert_eq!(end.into_entry(), None);
        assert_eq!(Iteration::<u8>::default(), Iteration::end());
    }

    #[test]
    fn null_like_value_is_still_valid() {
        let it = Iteration::new(Key::from("k"), Option::<u8>::None);
        assert!(it.is_valid());
        assert_eq!(it.value(), Some(&None));
        assert_eq!(it.into_parts(), (Some(Key::from("k")), Some(None)));
    }
}

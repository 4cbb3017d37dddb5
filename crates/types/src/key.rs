use core::fmt;
use serde::{Deserialize, Serialize};

/// A collection key.
///
/// Keys are either integers or strings. Ordering between keys carries no
/// meaning for stores, which iterate in insertion order; it is provided so
/// keys can be used in sorted containers by callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// An integer key, e.g. a list position.
    Int(i64),
    /// A string key.
    Str(String),
}

/// The kind of a [`Key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// [`Key::Int`].
    Int,
    /// [`Key::Str`].
    Str,
}

impl Key {
    /// Key for the list element at `index`.
    ///
    /// Indices beyond `i64::MAX` saturate.
    pub fn index(index: usize) -> Self {
        Self::Int(i64::try_from(index).unwrap_or(i64::MAX))
    }

    /// The kind of this key.
    pub const fn kind(&self) -> KeyKind {
        match self {
            Self::Int(_) => KeyKind::Int,
            Self::Str(_) => KeyKind::Str,
        }
    }

    /// Returns the integer if this is an integer key.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(_) => None,
        }
    }

    /// Returns the string if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }

    /// True if this is an integer key.
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Self::Int(i.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare() {
        assert_eq!(Key::from("k1").to_string(), "k1");
        assert_eq!(Key::from(-7i64).to_string(), "-7");
    }

    #[test]
    fn int_and_str_keys_differ() {
        assert_ne!(Key::from(1i64), Key::from("1"));
        assert_eq!(Key::from(1i64).kind(), KeyKind::Int);
        assert_eq!(Key::from("1").kind(), KeyKind::Str);
    }

    #[test]
    fn index_saturates() {
        assert_eq!(Key::index(3), Key::Int(3));
        assert_eq!(Key::index(usize::MAX), Key::Int(i64::MAX));
    }

    #[test]
    fn untagged_keys_prefer_integers() {
        let keys: Vec<Key> = serde_json::from_str(r#"[1, "a", "2"]"#).unwrap();
        assert_eq!(keys, vec![Key::Int(1), Key::from("a"), Key::from("2")]);
    }
}

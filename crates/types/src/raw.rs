use crate::{Key, Scalar};
use core::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// An insertion-ordered mapping of keys to raw values.
pub type RawMap = IndexMap<Key, RawValue>;

/// Raw heterogeneous data, as handed to collection constructors and
/// recursive factories.
///
/// A raw value is a tree: internal nodes are [`RawValue::Map`]s or
/// [`RawValue::List`]s, leaves are [`RawValue::Scalar`]s. [`RawValue::Null`]
/// is neither a scalar nor a structure.
///
/// Raw values round-trip through JSON. JSON object keys always deserialize
/// as [`Key::Str`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Absence of a value.
    #[default]
    Null,
    /// A leaf value.
    Scalar(Scalar),
    /// A sequence. Its keys are the positions `0..len`.
    List(Vec<RawValue>),
    /// A keyed structure.
    Map(RawMap),
}

/// The kind of a [`RawValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKind {
    /// [`RawValue::Null`].
    Null,
    /// [`RawValue::Scalar`].
    Scalar,
    /// [`RawValue::List`].
    List,
    /// [`RawValue::Map`].
    Map,
}

impl RawKind {
    /// True for lists and maps.
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::List | Self::Map)
    }
}

impl RawValue {
    /// An empty map.
    pub fn empty_map() -> Self {
        Self::Map(RawMap::new())
    }

    /// The kind of this value.
    pub const fn kind(&self) -> RawKind {
        match self {
            Self::Null => RawKind::Null,
            Self::Scalar(_) => RawKind::Scalar,
            Self::List(_) => RawKind::List,
            Self::Map(_) => RawKind::Map,
        }
    }

    /// True if this is a leaf value.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// True if this is a list or a map.
    pub const fn is_structured(&self) -> bool {
        self.kind().is_structured()
    }

    /// True if this is [`RawValue::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the scalar, if this is one.
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// View this value as a keyed structure.
    ///
    /// Maps are borrowed, lists are converted to a map keyed by position.
    /// Returns `None` for scalars and null.
    pub fn to_map(&self) -> Option<Cow<'_, RawMap>> {
        match self {
            Self::Map(map) => Some(Cow::Borrowed(map)),
            Self::List(items) => Some(Cow::Owned(
                items.iter().enumerate().map(|(i, v)| (Key::index(i), v.clone())).collect(),
            )),
            _ => None,
        }
    }

    /// Convert this value into a keyed structure, returning it unchanged if
    /// it is not structured.
    pub fn into_map(self) -> Result<RawMap, Self> {
        match self {
            Self::Map(map) => Ok(map),
            Self::List(items) => {
                Ok(items.into_iter().enumerate().map(|(i, v)| (Key::index(i), v)).collect())
            }
            other => Err(other),
        }
    }

    /// Look up a direct child of a map or list.
    pub fn get(&self, key: impl Into<Key>) -> Option<&RawValue> {
        let key = key.into();
        match self {
            Self::Map(map) => map.get(&key),
            Self::List(items) => {
                key.as_int().and_then(|i| usize::try_from(i).ok()).and_then(|i| items.get(i))
            }
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl From<Scalar> for RawValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Scalar(b.into())
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        Self::Scalar(i.into())
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        Self::Scalar(i.into())
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        Self::Scalar(f.into())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<RawMap> for RawValue {
    fn from(map: RawMap) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(items: Vec<RawValue>) -> Self {
        Self::List(items)
    }
}

impl<K: Into<Key>, V: Into<RawValue>> FromIterator<(K, V)> for RawValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => b.into(),
            Value::Number(n) => match n.as_i64() {
                Some(i) => i.into(),
                None => n.as_f64().map(Self::from).unwrap_or(Self::Null),
            },
            Value::String(s) => s.into(),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (Key::Str(k), Self::from(v))).collect())
            }
        }
    }
}

impl From<RawValue> for serde_json::Value {
    fn from(value: RawValue) -> Self {
        use serde_json::Value;
        match value {
            RawValue::Null => Value::Null,
            RawValue::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            RawValue::Scalar(Scalar::Int(i)) => Value::from(i),
            RawValue::Scalar(Scalar::Float(f)) => {
                serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
            }
            RawValue::Scalar(Scalar::Str(s)) => Value::String(s),
            RawValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            RawValue::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k.to_string(), Value::from(v))).collect())
            }
        }
    }
}

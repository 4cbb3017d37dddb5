use crate::{map::MemMap, model::NotFoundError};
use core::fmt;
use itertools::Itertools;
use ordo_types::{Key, RawValue, Scalar};
use std::sync::Arc;

/// A map of [`Node`]s, the product of recursive construction.
pub type NodeMap = MemMap<Node>;

/// A value in a recursively built map: a scalar leaf or a nested map.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf.
    Scalar(Scalar),
    /// A nested map.
    Map(Arc<NodeMap>),
}

impl Node {
    /// Returns the scalar, if this is a leaf.
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Map(_) => None,
        }
    }

    /// Returns the nested map, if this is one.
    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Scalar(_) => None,
            Self::Map(map) => Some(&**map),
        }
    }

    /// True if this is a nested map.
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Look up a child of a nested map.
    ///
    /// Leaves have no children, so every lookup on a leaf fails.
    pub fn get(&self, key: impl Into<Key>) -> Result<&Node, NotFoundError> {
        let key = key.into();
        match self {
            Self::Map(map) => map.get(key),
            Self::Scalar(_) => Err(NotFoundError::new(key)),
        }
    }

    /// Flatten back into raw data.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Self::Scalar(s) => RawValue::Scalar(s.clone()),
            Self::Map(map) => map.to_raw(),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<NodeMap> for Node {
    fn from(map: NodeMap) -> Self {
        Self::Map(Arc::new(map))
    }
}

impl From<Arc<NodeMap>> for Node {
    fn from(map: Arc<NodeMap>) -> Self {
        Self::Map(map)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(Scalar::Str(s)) => write!(f, "{s:?}"),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Map(map) => write!(f, "{map}"),
        }
    }
}

impl NodeMap {
    /// Flatten the tree back into raw data. Every level becomes a
    /// [`RawValue::Map`], in the order it was built.
    pub fn to_raw(&self) -> RawValue {
        RawValue::Map(self.store().iter().map(|(k, v)| (k.clone(), v.to_raw())).collect())
    }
}

impl fmt::Display for NodeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.store().iter().format_with(", ", |(k, v), g| g(&format_args!("{k}: {v}")));
        write!(f, "{{{entries}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> NodeMap {
        let inner: NodeMap =
            [("x", Node::from(Scalar::Int(1))), ("y", Scalar::from("two").into())].into_iter().collect();
        [("a", Node::from(inner)), ("b", Scalar::Bool(false).into())].into_iter().collect()
    }

    #[test]
    fn navigate_and_flatten() {
        let tree = tree();
        let a = tree.get("a").unwrap();
        assert!(a.is_map());
        assert_eq!(a.get("x").unwrap().as_scalar(), Some(&Scalar::Int(1)));
        assert!(tree.get("b").unwrap().get("x").is_err());

        let raw: RawValue = serde_json::json!({"a": {"x": 1, "y": "two"}, "b": false}).into();
        assert_eq!(tree.to_raw(), raw);
    }

    #[test]
    fn display_is_nested() {
        assert_eq!(tree().to_string(), r#"{a: {x: 1, y: "two"}, b: false}"#);
    }
}

use crate::{
    map::{Map, MemMap},
    mem::MemStore,
    model::InvalidArgumentError,
};
use ordo_types::{Key, RawMap, RawValue, Scalar};
use tracing::debug;

/// Builds a product from a configuration.
///
/// Object safe, so a [`RecursiveFactory`] can resolve child factories as
/// `&dyn MapFactory`.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait MapFactory {
    /// Configuration consumed by [`make`](Self::make).
    type Config;

    /// What the factory builds.
    type Product;

    /// Error raised while building.
    type Error;

    /// Build a product from `config`.
    fn make(&self, config: Self::Config) -> Result<Self::Product, Self::Error>;
}

/// Builds a tree of maps from nested raw data.
///
/// Each child of the raw map is normalised on its own:
///
/// - scalars go through [`normalize_scalar`],
/// - maps and lists go to the factory returned by [`child_factory`], with
///   the configuration from [`child_config`], and the product becomes the
///   node,
/// - anything else is an [`InvalidArgumentError`].
///
/// Implementors provide the three hooks. The provided methods are the
/// recursion and are not meant to be overridden, although they can be.
///
/// Errors from the child factory are returned as they are. The child
/// factory's error type is this factory's error type.
///
/// [`normalize_scalar`]: Self::normalize_scalar
/// [`child_factory`]: Self::child_factory
/// [`child_config`]: Self::child_config
pub trait RecursiveFactory {
    /// The value type of the built maps.
    type Node;

    /// What child factories build. Converted into a node.
    type Child: Into<Self::Node>;

    /// Configuration handed to child factories.
    type ChildConfig;

    /// Error raised anywhere in the build, including by child factories.
    type Error: From<InvalidArgumentError>;

    /// Normalise a scalar child stored under `key`.
    fn normalize_scalar(&self, key: &Key, scalar: Scalar) -> Result<Self::Node, Self::Error>;

    /// Resolve the factory that builds the structured `child` stored under
    /// `key` in `parent`.
    fn child_factory(
        &self,
        key: &Key,
        child: &RawValue,
        parent: &RawMap,
    ) -> &dyn MapFactory<Config = Self::ChildConfig, Product = Self::Child, Error = Self::Error>;

    /// Derive the configuration the child factory receives for `child`.
    fn child_config(
        &self,
        key: &Key,
        child: &RawValue,
        parent: &RawMap,
    ) -> Result<Self::ChildConfig, Self::Error>;

    /// Normalise one child of `parent`.
    fn normalize_child(
        &self,
        key: &Key,
        child: &RawValue,
        parent: &RawMap,
    ) -> Result<Self::Node, Self::Error> {
        match child {
            RawValue::Scalar(scalar) => self.normalize_scalar(key, scalar.clone()),
            RawValue::List(_) | RawValue::Map(_) => {
                self.normalize_complex_child(key, child, parent)
            }
            RawValue::Null => Err(InvalidArgumentError::with_argument(
                format!("child `{key}` is neither a scalar nor a structure"),
                RawValue::Null,
            )
            .into()),
        }
    }

    /// Normalise a structured child by building a child instance for it.
    fn normalize_complex_child(
        &self,
        key: &Key,
        child: &RawValue,
        parent: &RawMap,
    ) -> Result<Self::Node, Self::Error> {
        self.create_child_instance(key, child, parent).map(Into::into)
    }

    /// Build the child instance for a structured child.
    fn create_child_instance(
        &self,
        key: &Key,
        child: &RawValue,
        parent: &RawMap,
    ) -> Result<Self::Child, Self::Error> {
        let config = self.child_config(key, child, parent)?;
        let factory = self.child_factory(key, child, parent);
        debug!(%key, "invoking child factory");
        factory.make(config)
    }

    /// Normalise every child of `raw`, in order, into one map.
    fn build(&self, raw: &RawMap) -> Result<MemMap<Self::Node>, Self::Error> {
        let mut store = MemStore::with_capacity(raw.len());
        for (key, child) in raw {
            let node = self.normalize_child(key, child, raw)?;
            store.insert(key.clone(), node);
        }
        debug!(entries = raw.len(), "built map level");
        Ok(Map::new(store))
    }
}

use super::{FactoryError, MapFactory, Node, NodeMap, RecursiveFactory};
use crate::{
    config::{MapConfig, ScalarPolicy},
    model::InvalidArgumentError,
};
use ahash::AHashMap;
use core::fmt;
use ordo_types::{Key, RawMap, RawValue, Scalar};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A shareable child factory producing [`NodeMap`]s.
pub type SharedMapFactory =
    Arc<dyn MapFactory<Config = MapConfig, Product = NodeMap, Error = FactoryError> + Send + Sync>;

/// Recursive factory for countable maps.
///
/// [`make`] takes a [`MapConfig`] whose `data` is a map or a list and
/// returns a [`NodeMap`]. Scalar children are normalised by the factory's
/// [`ScalarPolicy`]. Structured children are built by the child factory
/// registered for their key, or by this factory itself.
///
/// ```
/// use ordo_map::{config::MapConfig, factory::{CountableMapFactory, MapFactory}};
/// use serde_json::json;
///
/// let factory = CountableMapFactory::default();
/// let map = factory.make(MapConfig::new(json!({"a": {"b": 1}}))).unwrap();
/// assert_eq!(map.len(), 1);
/// assert!(map.get("a").unwrap().is_map());
/// ```
///
/// [`make`]: MapFactory::make
#[derive(Clone, Default)]
pub struct CountableMapFactory {
    policy: ScalarPolicy,
    overrides: AHashMap<Key, SharedMapFactory>,
}

impl fmt::Debug for CountableMapFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountableMapFactory")
            .field("policy", &self.policy)
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CountableMapFactory {
    /// Create a factory with the default policy and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start configuring a factory.
    pub fn builder() -> CountableMapFactoryBuilder {
        CountableMapFactoryBuilder::new()
    }

    /// The scalar policy.
    pub const fn policy(&self) -> ScalarPolicy {
        self.policy
    }

    /// True if a child factory override is registered for `key`.
    pub fn has_override(&self, key: impl Into<Key>) -> bool {
        self.overrides.contains_key(&key.into())
    }

    /// Parse a JSON configuration and build from it.
    ///
    /// The text must be an object with a `data` entry.
    pub fn make_json(&self, config: &str) -> Result<NodeMap, FactoryError> {
        self.make(config.parse::<MapConfig>()?)
    }
}

impl MapFactory for CountableMapFactory {
    type Config = MapConfig;
    type Product = NodeMap;
    type Error = FactoryError;

    #[instrument(skip_all)]
    fn make(&self, config: MapConfig) -> Result<NodeMap, FactoryError> {
        let raw = config
            .into_data()
            .into_map()
            .map_err(|other| InvalidArgumentError::with_argument("data is not a map or a list", other))?;
        let map = self.build(&raw)?;
        debug!(entries = map.len(), policy = %self.policy, "made map");
        Ok(map)
    }
}

impl RecursiveFactory for CountableMapFactory {
    type Node = Node;
    type Child = NodeMap;
    type ChildConfig = MapConfig;
    type Error = FactoryError;

    fn normalize_scalar(&self, _key: &Key, scalar: Scalar) -> Result<Node, FactoryError> {
        Ok(Node::Scalar(self.policy.apply(scalar)))
    }

    fn child_factory(
        &self,
        key: &Key,
        _child: &RawValue,
        _parent: &RawMap,
    ) -> &dyn MapFactory<Config = MapConfig, Product = NodeMap, Error = FactoryError> {
        if let Some(factory) = self.overrides.get(key) {
            debug!(%key, "using child factory override");
            return &**factory;
        }
        self
    }

    fn child_config(
        &self,
        _key: &Key,
        child: &RawValue,
        _parent: &RawMap,
    ) -> Result<MapConfig, FactoryError> {
        Ok(MapConfig::new(child.clone()))
    }
}

/// Builder for [`CountableMapFactory`].
#[derive(Default)]
pub struct CountableMapFactoryBuilder {
    policy: ScalarPolicy,
    overrides: AHashMap<Key, SharedMapFactory>,
}

impl fmt::Debug for CountableMapFactoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountableMapFactoryBuilder")
            .field("policy", &self.policy)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

impl CountableMapFactoryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scalar policy.
    pub const fn policy(mut self, policy: ScalarPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build structured children stored under `key` with `factory`, at any
    /// depth.
    pub fn child_factory(mut self, key: impl Into<Key>, factory: SharedMapFactory) -> Self {
        self.overrides.insert(key.into(), factory);
        self
    }

    /// Like [`child_factory`](Self::child_factory), taking the factory by
    /// value.
    pub fn child_factory_with<F>(self, key: impl Into<Key>, factory: F) -> Self
    where
        F: MapFactory<Config = MapConfig, Product = NodeMap, Error = FactoryError>
            + Send
            + Sync
            + 'static,
    {
        self.child_factory(key, Arc::new(factory))
    }

    /// Build the factory.
    pub fn build(self) -> CountableMapFactory {
        CountableMapFactory { policy: self.policy, overrides: self.overrides }
    }
}

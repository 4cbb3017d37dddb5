//! Ordered key-value maps.
//!
//! A [`Map`] is a read-oriented collection over any store implementing
//! [`KvRead`]. It answers lookups directly and is walked through
//! [`Traversal`] sessions, a lazy and restartable iteration protocol that
//! reports store failures as typed [`IterationError`]s.
//!
//! Nested raw data is turned into trees of maps by a [`RecursiveFactory`].
//! [`CountableMapFactory`] is the shipped one.
//!
//! # Quick Start
//!
//! ```
//! use ordo_map::{CountableMapFactory, MapFactory, config::MapConfig};
//! use serde_json::json;
//!
//! let factory = CountableMapFactory::default();
//! let map = factory.make(MapConfig::new(json!({"a": {"x": 1}, "b": 2}))).unwrap();
//!
//! assert!(map.has("a"));
//! for entry in &map {
//!     let (key, node) = entry.unwrap();
//!     println!("{key} = {node}");
//! }
//! ```
//!
//! # Trait Model
//!
//! ```text
//! KvRead                      ← store: get / has / len / cursor()
//!   └─ Map<S>                 ← get / has / len / traverse()
//!        └─ Traversal<'_, S>  ← restart / advance / current_* / Iterator
//!
//! MapFactory                  ← make(config)
//!   └─ RecursiveFactory       ← normalize_scalar / child_factory / child_config
//!        └─ CountableMapFactory
//! ```
//!
//! # Feature Flags
//!
//! - **`test-utils`**: Enables the [`conformance`] module with store
//!   conformance tests, and the [`test_utils`] module with a fault-injecting
//!   store. The `conformance` and `iteration_errors` integration tests
//!   require it: run them with `cargo test --features test-utils`.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Conformance tests for stores.
#[cfg(any(test, feature = "test-utils"))]
pub mod conformance;

pub mod config;
pub use config::{ConfigError, DATA_KEY, MapConfig, ScalarPolicy};

pub mod factory;
pub use factory::{
    CountableMapFactory, CountableMapFactoryBuilder, FactoryError, MapFactory, Node, NodeMap,
    RecursiveFactory, SharedMapFactory,
};

mod map;
pub use map::{Map, MemMap};

pub mod mem;
pub use mem::MemStore;

pub mod model;
pub use model::{
    InvalidArgumentError, Iteration, IterationError, KvCursor, KvRead, NotFoundError,
    StoreError, Traversal, TraversalId, TraversalState, TraverseError,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ordo_types::{Key, RawMap, RawValue, Scalar};

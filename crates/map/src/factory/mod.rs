//! Recursive construction of nested maps from raw data.
//!
//! [`RecursiveFactory`] is the protocol: it decides, per child of a raw
//! map, whether the child is stored as a normalised scalar or materialised
//! into a nested map by a child [`MapFactory`]. [`CountableMapFactory`] is
//! the shipped implementation, producing [`NodeMap`] trees.
//!
//! ```text
//! make(MapConfig { data })
//!   └─ build(raw map)
//!        ├─ scalar child      → normalize_scalar        → Node::Scalar
//!        ├─ map / list child  → child_factory.make(cfg) → Node::Map
//!        └─ null              → InvalidArgumentError
//! ```

mod countable;
pub use countable::{CountableMapFactory, CountableMapFactoryBuilder, SharedMapFactory};

mod error;
pub use error::FactoryError;

mod node;
pub use node::{Node, NodeMap};

mod traits;
pub use traits::{MapFactory, RecursiveFactory};

//! Restartable traversal on top of store cursors.
//!
//! ## Type Hierarchy
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Iteration`] | Immutable `(key, value)` snapshot of one position |
//! | [`IterationCursor`] | Store cursor plus validity tracking |
//! | [`Traversal`] | The external iteration state machine |
//! | [`TraversalState`] | `Unstarted`, `Positioned` or `Exhausted` |
//! | [`TraversalId`] | Identity of a traversal, carried by its errors |
//!
//! A [`Traversal`] is obtained from a map and borrows it. Traversals do not
//! share cursor state, so any number of them may walk the same map.

mod cursor;
mod iteration;
mod traversal;

pub use cursor::IterationCursor;
pub use iteration::Iteration;
pub use traversal::{Traversal, TraversalId, TraversalState};

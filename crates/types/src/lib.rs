//! Types used by the ordo collection crates.
//!
//! These are the low-level data types shared between the collection model
//! and its backends: the [`Key`] type every store is keyed by, the
//! [`Scalar`] leaf values, and the [`RawValue`] tree that recursive
//! factories consume.

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

mod key;
pub use key::{Key, KeyKind};

mod raw;
pub use raw::{RawKind, RawMap, RawValue};

mod scalar;
pub use scalar::{Scalar, ScalarError};

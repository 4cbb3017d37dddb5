#![allow(dead_code)]

mod query;
mod traverse;

pub use query::*;
pub use traverse::*;

use crate::{Map, model::KvRead};
use ordo_types::{Key, RawValue};
use serde_json::json;

/// Run all conformance tests against a store constructor.
///
/// `make` must return a store holding exactly the given entries, in the
/// given order, with cursors that do not fail.
pub fn conformance<S, F>(make: F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    test_traversal_completeness(&make);
    test_restart_idempotence(&make);
    test_iterator_matches_protocol(&make);
    test_empty_store(&make);
    test_independent_traversals(&make);
    test_query_independence(&make);
    test_not_found(&make);
    test_null_value_is_present(&make);
    test_len_matches_traversal(&make);
}

/// Entries of mixed kinds, including a null value and an integer key.
pub fn sample_entries() -> Vec<(Key, RawValue)> {
    vec![
        (Key::from("alpha"), RawValue::from(1i64)),
        (Key::from("beta"), RawValue::from("two")),
        (Key::Int(3), RawValue::from(true)),
        (Key::from("nil"), RawValue::Null),
        (Key::from("nested"), json!({"x": 1, "y": [1, 2]}).into()),
        (Key::Int(-1), RawValue::from(0.5)),
    ]
}

/// Build a map over `make(entries)`.
pub(crate) fn map_of<S, F>(make: &F, entries: Vec<(Key, RawValue)>) -> Map<S>
where
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    Map::new(make(entries))
}

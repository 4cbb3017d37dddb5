//! Lookup tests.

use super::{map_of, sample_entries};
use crate::model::KvRead;
use ordo_types::{Key, RawValue};

/// Lookups give the same answers before, during and after a traversal.
pub fn test_query_independence<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, sample_entries());
    let check = || {
        for (key, value) in sample_entries() {
            assert!(map.has(key.clone()));
            assert_eq!(map.get(key).unwrap(), &value);
        }
        assert!(!map.has("missing"));
    };

    check();
    let mut traversal = map.traverse();
    check();
    traversal.restart().unwrap();
    traversal.advance().unwrap();
    check();
    while traversal.advance().unwrap() {}
    check();
}

/// `get` on an absent key fails with the key; `has` tells presence apart.
pub fn test_not_found<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, vec![(Key::from("k1"), RawValue::from("v1"))]);

    let err = map.get("k2").unwrap_err();
    assert_eq!(err.key(), &Key::from("k2"));
    assert!(!map.has("k2"));
    assert!(map.has("k1"));
    assert_eq!(map.get("k1").unwrap(), &RawValue::from("v1"));

    // integer and string keys are distinct
    let map = map_of(make, vec![(Key::Int(1), RawValue::from(1i64))]);
    assert!(map.has(1i64));
    assert!(!map.has("1"));
}

/// A null value is a present entry, both for lookups and traversal.
pub fn test_null_value_is_present<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, vec![(Key::from("nil"), RawValue::Null)]);
    assert!(map.has("nil"));
    assert_eq!(map.get("nil").unwrap(), &RawValue::Null);

    let mut traversal = map.traverse();
    traversal.restart().unwrap();
    assert!(traversal.valid());
    assert_eq!(traversal.current_key(), Some(&Key::from("nil")));
    assert_eq!(traversal.current_value(), Some(&RawValue::Null));
    assert!(!traversal.advance().unwrap());
}

/// `len` matches the number of pairs a traversal yields.
pub fn test_len_matches_traversal<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    for entries in [vec![], sample_entries(), sample_entries()[..2].to_vec()] {
        let expected = entries.len();
        let map = map_of(make, entries);
        assert_eq!(map.len(), expected);
        assert_eq!(map.is_empty(), expected == 0);
        assert_eq!(map.iter().count(), expected);
    }
}

//! Traversal tests.

use super::{map_of, sample_entries};
use crate::{
    Map,
    model::{Iteration, KvRead, TraversalState},
};
use ordo_types::{Key, RawValue};

/// Walk a map with the explicit protocol, asserting the final snapshot is
/// the end sentinel.
fn walk<S>(map: &Map<S>) -> Vec<(Key, RawValue)>
where
    S: KvRead<Value = RawValue>,
{
    let mut traversal = map.traverse();
    traversal.restart().unwrap();

    let mut seen = Vec::new();
    while traversal.valid() {
        let key = traversal.current_key().cloned().unwrap();
        let value = traversal.current_value().cloned().unwrap();
        seen.push((key, value));
        traversal.advance().unwrap();
    }

    assert_eq!(traversal.state(), TraversalState::Exhausted);
    assert_eq!(traversal.current_key(), None);
    assert_eq!(traversal.current_value(), None);
    assert_eq!(traversal.position(), seen.len());
    seen
}

/// A full traversal yields every entry, in insertion order, then the end
/// sentinel.
pub fn test_traversal_completeness<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, sample_entries());
    assert_eq!(walk(&map), sample_entries());
}

/// Restarting reproduces the identical sequence.
pub fn test_restart_idempotence<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, sample_entries());

    let mut traversal = map.traverse();
    let mut passes = Vec::new();
    for _ in 0..2 {
        traversal.restart().unwrap();
        let mut pass = Vec::new();
        while let Some(key) = traversal.current_key() {
            pass.push(key.clone());
            traversal.advance().unwrap();
        }
        passes.push(pass);
    }
    assert_eq!(passes[0], passes[1]);
    assert_eq!(passes[0].len(), sample_entries().len());

    // a restart midway also begins at the first entry
    traversal.restart().unwrap();
    traversal.advance().unwrap();
    traversal.restart().unwrap();
    let first = Iteration::new(Key::from("alpha"), RawValue::from(1i64));
    assert_eq!(traversal.current_iteration(), &first);

    // draining the iterator, restarting, and draining again repeats it
    let drained: Vec<_> = traversal.by_ref().collect::<Result<_, _>>().unwrap();
    traversal.restart().unwrap();
    let again: Vec<_> = traversal.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(drained, again);
    assert_eq!(again, sample_entries());
}

/// The iterator adapter yields the same pairs as the explicit protocol.
pub fn test_iterator_matches_protocol<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, sample_entries());
    let pairs: Vec<_> = map.iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(pairs, walk(&map));

    let mut iter = map.iter();
    for entry in iter.by_ref() {
        entry.unwrap();
    }
    assert!(iter.next().is_none());
}

/// An empty store is exhausted right after the first restart.
pub fn test_empty_store<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, vec![]);
    assert!(map.is_empty());

    let mut traversal = map.traverse();
    traversal.restart().unwrap();
    assert!(!traversal.valid());
    assert_eq!(traversal.state(), TraversalState::Exhausted);
    assert!(!traversal.advance().unwrap());

    assert!(map.iter().next().is_none());
}

/// Two traversals over one map do not share position.
pub fn test_independent_traversals<S, F>(make: &F)
where
    S: KvRead<Value = RawValue>,
    F: Fn(Vec<(Key, RawValue)>) -> S,
{
    let map = map_of(make, sample_entries());
    let mut first = map.traverse();
    let mut second = map.traverse();
    assert_ne!(first.id(), second.id());

    first.restart().unwrap();
    first.advance().unwrap();
    first.advance().unwrap();
    second.restart().unwrap();

    assert_eq!(first.current_key(), Some(&Key::Int(3)));
    assert_eq!(second.current_key(), Some(&Key::from("alpha")));

    second.advance().unwrap();
    assert_eq!(first.position(), 2);
    assert_eq!(second.position(), 1);
}

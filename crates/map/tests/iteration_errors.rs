use ordo_map::{
    Key, Map, RawValue, TraversalState, TraverseError,
    test_utils::{FaultError, FaultOp, FaultPlan, FaultyStore},
};
use std::error::Error as _;

fn entries() -> Vec<(Key, RawValue)> {
    vec![
        (Key::from("a"), RawValue::from(1i64)),
        (Key::from("b"), RawValue::Null),
        (Key::from("c"), RawValue::from("three")),
    ]
}

fn map(plan: FaultPlan) -> Map<FaultyStore<RawValue>> {
    Map::new(FaultyStore::from_entries(entries(), plan))
}

#[test]
fn advance_wraps_step_failure() {
    let map = map(FaultPlan::step(0).with_token(1234));
    let mut traversal = map.traverse();
    traversal.restart().unwrap();

    let err = traversal.advance().unwrap_err();
    let injected = FaultError { token: 1234, op: FaultOp::Step };
    assert_eq!(err.cause(), &injected);
    assert_eq!(err.traversal(), traversal.id());
    assert_eq!(err.position(), 0);

    let source = err.source().unwrap().downcast_ref::<FaultError>().unwrap();
    assert_eq!(source, &injected);
    assert!(err.to_string().contains(&traversal.id().to_string()));
}

#[test]
fn errors_name_their_own_traversal() {
    let map = map(FaultPlan::step(1));
    let mut first = map.traverse();
    let mut second = map.traverse();
    first.restart().unwrap();
    second.restart().unwrap();
    first.advance().unwrap();
    second.advance().unwrap();

    let e1 = first.advance().unwrap_err();
    let e2 = second.advance().unwrap_err();
    assert_eq!(e1.traversal(), first.id());
    assert_eq!(e2.traversal(), second.id());
    assert_ne!(e1.traversal(), e2.traversal());
}

#[test]
fn failed_advance_keeps_snapshot() {
    let map = map(FaultPlan::step(1));
    let mut traversal = map.traverse();
    traversal.restart().unwrap();
    traversal.advance().unwrap();
    let before = traversal.current_iteration().clone();

    assert!(traversal.advance().is_err());
    assert_eq!(traversal.current_iteration(), &before);
    assert_eq!(traversal.position(), 1);
    assert_eq!(traversal.state(), TraversalState::Positioned);
    // the null value is still a present entry
    assert_eq!(traversal.current_value(), Some(&RawValue::Null));
}

#[test]
fn restart_failure_is_raw() {
    let map = map(FaultPlan::cursor().with_token(5));
    let mut traversal = map.traverse();
    assert_eq!(traversal.restart(), Err(FaultError { token: 5, op: FaultOp::Cursor }));

    let map = self::map(FaultPlan::rewind().with_token(6));
    let mut traversal = map.traverse();
    assert_eq!(traversal.restart(), Err(FaultError { token: 6, op: FaultOp::Rewind }));
}

#[test]
fn iterator_yields_error_then_fuses() {
    let map = map(FaultPlan::step(1).with_token(8));
    let mut iter = map.iter();

    assert_eq!(iter.next().unwrap().unwrap().0, Key::from("a"));
    assert_eq!(iter.next().unwrap().unwrap().0, Key::from("b"));

    let err = iter.next().unwrap().unwrap_err();
    let TraverseError::Iteration(inner) = &err else { panic!("expected an iteration error: {err}") };
    assert_eq!(inner.cause(), &FaultError { token: 8, op: FaultOp::Step });
    assert_eq!(err.store_error().token, 8);

    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn iterator_reports_restart_failure() {
    let map = map(FaultPlan::rewind().with_token(3));
    let mut iter = map.iter();
    let err = iter.next().unwrap().unwrap_err();
    assert!(matches!(err, TraverseError::Restart(FaultError { token: 3, op: FaultOp::Rewind })));
    assert!(iter.next().is_none());
}

#[test]
fn lookups_work_while_cursors_fail() {
    let map = map(FaultPlan::cursor());
    assert_eq!(map.get("c").unwrap(), &RawValue::from("three"));
    assert!(map.has("b"));
    assert!(map.get("z").is_err());
    assert!(map.iter().next().unwrap().is_err());
}

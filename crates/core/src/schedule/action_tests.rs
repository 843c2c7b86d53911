// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn new_action_defaults_to_non_reschedulable_and_empty_arguments() {
    let action = ScheduledAction::new("expire", Duration::from_secs(1));

    assert_eq!(action.name(), "expire");
    assert!(!action.is_reschedulable());
    assert!(action.arguments().is_empty());
    assert_eq!(action.offset(), Duration::from_secs(1));
}

#[test]
fn reschedulable_builder_sets_the_flag() {
    let action = ScheduledAction::new("expire", Duration::from_secs(1)).reschedulable();

    assert!(action.is_reschedulable());
}

#[test]
fn empty_arguments_encode_as_empty_object() {
    let args = ActionArguments::new();

    assert_eq!(args.to_canonical_json().unwrap(), "{}");
}

#[test]
fn canonical_json_is_key_ordered() {
    let mut args = ActionArguments::new();
    args.insert("zeta", "last");
    args.insert("alpha", 1i64);
    args.insert("mid", true);

    assert_eq!(
        args.to_canonical_json().unwrap(),
        r#"{"alpha":1,"mid":true,"zeta":"last"}"#
    );
}

#[test]
fn canonical_json_is_stable_across_insertion_order() {
    let mut a = ActionArguments::new();
    a.insert("x", 1i64);
    a.insert("y", 2i64);

    let mut b = ActionArguments::new();
    b.insert("y", 2i64);
    b.insert("x", 1i64);

    assert_eq!(
        a.to_canonical_json().unwrap(),
        b.to_canonical_json().unwrap()
    );
}

#[test]
fn scalar_kinds_round_trip_through_serde() {
    let mut args = ActionArguments::new();
    args.insert("flag", true);
    args.insert("count", 3i64);
    args.insert("ratio", 0.5f64);
    args.insert("label", "hello");

    let json = args.to_canonical_json().unwrap();
    let back: ActionArguments = serde_json::from_str(&json).unwrap();

    assert_eq!(back, args);
    assert_eq!(back.get("count"), Some(&ArgValue::Integer(3)));
    assert_eq!(back.get("flag"), Some(&ArgValue::Bool(true)));
}

#[test]
fn with_argument_accumulates() {
    let action = ScheduledAction::new("notify", Duration::from_secs(30))
        .with_argument("channel", "ops")
        .with_argument("attempts", 2i64);

    assert_eq!(action.arguments().len(), 2);
    assert_eq!(
        action.arguments().get("channel"),
        Some(&ArgValue::String("ops".to_string()))
    );
}

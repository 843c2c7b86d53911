// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::TriggerEvent;
use crate::subject::{ExtractError, FieldPathExtractor, FnExtractor};
use serde_json::json;

#[test]
fn resolves_an_object_result_into_a_subject() {
    let resolver = SubjectResolver::new();
    let event = TriggerEvent::new(json!({"order": {"id": 1}}));
    let extractor = FieldPathExtractor::new("order", "Order");

    let subject = resolver
        .resolve(&event, "order.created", "order_flow", &extractor)
        .unwrap();

    assert_eq!(subject.kind(), "Order");
    assert_eq!(subject.field("id"), Some(&json!(1)));
}

#[test]
fn scalar_result_is_a_non_object_failure() {
    let resolver = SubjectResolver::new();
    let event = TriggerEvent::new(json!({"order": 42}));
    let extractor = FieldPathExtractor::new("order", "Order");

    let err = resolver
        .resolve(&event, "order.created", "order_flow", &extractor)
        .unwrap_err();

    assert!(matches!(err, ResolutionFailure::NonObjectResult { .. }));
}

#[test]
fn missing_path_is_a_non_object_failure() {
    let resolver = SubjectResolver::new();
    let event = TriggerEvent::new(json!({"invoice": {"id": 1}}));
    let extractor = FieldPathExtractor::new("order", "Order");

    let err = resolver
        .resolve(&event, "order.created", "order_flow", &extractor)
        .unwrap_err();

    assert!(matches!(err, ResolutionFailure::NonObjectResult { .. }));
}

#[test]
fn extractor_errors_become_evaluation_failures() {
    let resolver = SubjectResolver::new();
    let event = TriggerEvent::new(json!({}));
    let extractor = FnExtractor::new("boom", "Order", |_: &TriggerEvent| {
        Err(ExtractError::Failed("lookup blew up".to_string()))
    });

    let err = resolver
        .resolve(&event, "order.created", "order_flow", &extractor)
        .unwrap_err();

    assert!(
        matches!(err, ResolutionFailure::EvaluationError { ref detail, .. } if detail.contains("lookup blew up"))
    );
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::context::WorkflowContext;
use crate::event::TriggerEvent;
use crate::id::SequentialIdGen;
use crate::schedule::{ActionScheduler, MemoryJobStore, ScheduledAction};
use crate::subject::SubjectRef;
use crate::testkit::FakeWorkflow;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn context_with(workflow: Arc<FakeWorkflow>) -> WorkflowContext {
    let subject = SubjectRef::from_value("Order", json!({"id": "1"})).unwrap();
    WorkflowContext::new(workflow, subject, "1")
}

#[tokio::test]
async fn transition_reaction_applies_enabled_transitions() {
    let workflow = Arc::new(FakeWorkflow::new("order_flow").with_enabled(&["activate", "close"]));
    let context = context_with(workflow.clone());
    let event = TriggerEvent::new(json!({}));
    let transitions = vec!["activate".to_string(), "close".to_string()];

    TransitionReaction::new()
        .handle("order.created", &event, &transitions, &context)
        .await
        .unwrap();

    let applied = workflow.applied();
    assert_eq!(applied.len(), 2);
    assert_eq!(applied[0].1, "activate");
    assert_eq!(applied[1].1, "close");
}

#[tokio::test]
async fn transition_reaction_skips_disabled_transitions() {
    let workflow = Arc::new(FakeWorkflow::new("order_flow").with_enabled(&["close"]));
    let context = context_with(workflow.clone());
    let event = TriggerEvent::new(json!({}));
    let transitions = vec!["activate".to_string(), "close".to_string()];

    TransitionReaction::new()
        .handle("order.created", &event, &transitions, &context)
        .await
        .unwrap();

    let applied = workflow.applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].1, "close");
}

#[tokio::test]
async fn schedule_reaction_defers_every_action() {
    let store = MemoryJobStore::with_ids(SequentialIdGen::new("sj"));
    let reaction = ScheduleReaction::new(ActionScheduler::new(store.clone(), FakeClock::new()));
    let context = context_with(Arc::new(FakeWorkflow::new("order_flow")));
    let event = TriggerEvent::new(json!({}));
    let actions = vec![
        ScheduledAction::new("expire", Duration::from_secs(60)).reschedulable(),
        ScheduledAction::new("notify", Duration::from_secs(5)),
    ];

    reaction
        .handle("order.created", &event, &actions, &context)
        .await
        .unwrap();

    assert_eq!(store.jobs().len(), 2);
}

#[tokio::test]
async fn schedule_reaction_tags_store_failures_severe() {
    let store = MemoryJobStore::new();
    store.fail_with("disk full");
    let reaction = ScheduleReaction::new(ActionScheduler::new(store, FakeClock::new()));
    let context = context_with(Arc::new(FakeWorkflow::new("order_flow")));
    let event = TriggerEvent::new(json!({}));
    let actions = vec![ScheduledAction::new("expire", Duration::from_secs(60))];

    let err = reaction
        .handle("order.created", &event, &actions, &context)
        .await
        .unwrap_err();

    assert_eq!(err.severity(), Severity::Severe);
}

#[test]
fn reaction_error_constructors_tag_severity() {
    assert_eq!(
        ReactionError::recoverable("boom").severity(),
        Severity::Recoverable
    );
    assert_eq!(ReactionError::severe("boom").severity(), Severity::Severe);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener reactions
//!
//! A reaction is the capability injected into the dispatch engine; the engine
//! owns subject resolution and failure isolation, the reaction owns what
//! happens once a context exists.

use crate::clock::Clock;
use crate::context::WorkflowContext;
use crate::event::TriggerEvent;
use crate::schedule::{ActionScheduler, ScheduledAction, ScheduledJobStore};
use async_trait::async_trait;
use thiserror::Error;

/// How badly a reaction failed
///
/// Recoverable covers ordinary error conditions; severe covers
/// corrupted-state or assertion-class failures. Both are contained at the
/// dispatch boundary, they only differ in log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Recoverable,
    Severe,
}

/// Failure raised by a reaction, tagged with its severity
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ReactionError {
    severity: Severity,
    message: String,
}

impl ReactionError {
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Recoverable,
            message: message.into(),
        }
    }

    pub fn severe(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Severe,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Reaction to a dispatched event, polymorphic over the rule payload `P`
#[async_trait]
pub trait Reaction<P: Send + Sync>: Send + Sync {
    /// Label describing the activity, used in failure logs
    fn activity(&self) -> &str {
        "react"
    }

    async fn handle(
        &self,
        event_name: &str,
        event: &TriggerEvent,
        payload: &P,
        context: &WorkflowContext,
    ) -> Result<(), ReactionError>;
}

/// Applies the rule's transitions through the workflow handle
///
/// Transitions run in payload order against the subject as updated by each
/// preceding transition. A transition that is not currently enabled is
/// skipped, not an error; an engine failure while applying one is.
#[derive(Debug, Clone, Default)]
pub struct TransitionReaction;

impl TransitionReaction {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reaction<Vec<String>> for TransitionReaction {
    fn activity(&self) -> &str {
        "apply transition"
    }

    async fn handle(
        &self,
        event_name: &str,
        _event: &TriggerEvent,
        transitions: &Vec<String>,
        context: &WorkflowContext,
    ) -> Result<(), ReactionError> {
        let workflow = context.workflow();
        let mut subject = context.subject().clone();

        for transition in transitions {
            if !workflow.can(&subject, transition) {
                tracing::debug!(
                    workflow = %context.workflow_name(),
                    event = %event_name,
                    transition = %transition,
                    subject_id = %context.subject_id(),
                    "transition not enabled, skipped"
                );
                continue;
            }

            subject = workflow.apply(&subject, transition).map_err(|e| {
                ReactionError::recoverable(format!("cannot apply transition '{transition}': {e}"))
            })?;

            tracing::info!(
                workflow = %context.workflow_name(),
                event = %event_name,
                transition = %transition,
                subject_id = %context.subject_id(),
                "transition applied"
            );
        }

        Ok(())
    }
}

/// Defers the rule's actions through the action scheduler
///
/// Scheduling failures mean persisted state may be inconsistent, so they are
/// tagged severe; the dispatch boundary logs them at critical severity while
/// other rules continue.
pub struct ScheduleReaction<S: ScheduledJobStore, C: Clock> {
    scheduler: ActionScheduler<S, C>,
}

impl<S: ScheduledJobStore, C: Clock> ScheduleReaction<S, C> {
    pub fn new(scheduler: ActionScheduler<S, C>) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl<S: ScheduledJobStore, C: Clock + 'static> Reaction<Vec<ScheduledAction>>
    for ScheduleReaction<S, C>
{
    fn activity(&self) -> &str {
        "schedule action"
    }

    async fn handle(
        &self,
        _event_name: &str,
        _event: &TriggerEvent,
        actions: &Vec<ScheduledAction>,
        context: &WorkflowContext,
    ) -> Result<(), ReactionError> {
        for action in actions {
            self.scheduler
                .schedule_action(context, action)
                .await
                .map_err(|e| {
                    ReactionError::severe(format!("cannot schedule action '{}': {e}", action.name()))
                })?;
        }

        Ok(())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch engine
//!
//! Maps event name -> workflow -> trigger rule and processes each rule
//! independently: a bad extractor, a missing workflow or a failing reaction
//! never blocks the remaining rules for the same event.

use super::reaction::{Reaction, Severity};
use super::resolver::SubjectResolver;
use crate::context::{ContextFactory, WorkflowContext};
use crate::event::TriggerEvent;
use crate::subject::SubjectExtractor;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced to the dispatch caller
///
/// An unregistered event name signals a wiring defect and is the only
/// dispatch-level error; everything per-rule is contained and logged.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no trigger rules registered for event '{0}'")]
    UnsupportedEvent(String),
}

/// One (workflow, extraction, payload) registration for an event
pub struct TriggerRule<P> {
    workflow: String,
    extractor: Arc<dyn SubjectExtractor>,
    payload: P,
}

impl<P> TriggerRule<P> {
    pub fn new(
        workflow: impl Into<String>,
        extractor: Arc<dyn SubjectExtractor>,
        payload: P,
    ) -> Self {
        Self {
            workflow: workflow.into(),
            extractor,
            payload,
        }
    }

    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    pub fn extractor(&self) -> &Arc<dyn SubjectExtractor> {
        &self.extractor
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }
}

/// Routes named events through their registered trigger rules
pub struct DispatchEngine<P, R> {
    rules: HashMap<String, Vec<TriggerRule<P>>>,
    resolver: SubjectResolver,
    contexts: ContextFactory,
    reaction: R,
}

impl<P, R> DispatchEngine<P, R>
where
    P: Send + Sync,
    R: Reaction<P>,
{
    pub fn new(contexts: ContextFactory, reaction: R) -> Self {
        Self {
            rules: HashMap::new(),
            resolver: SubjectResolver::new(),
            contexts,
            reaction,
        }
    }

    /// Register a trigger rule for an event name
    ///
    /// Idempotent per (event, workflow): re-registering overwrites the
    /// existing rule in place, keeping its position in the registration
    /// order.
    pub fn register_rule(&mut self, event_name: impl Into<String>, rule: TriggerRule<P>) {
        let rules = self.rules.entry(event_name.into()).or_default();
        match rules.iter_mut().find(|r| r.workflow == rule.workflow) {
            Some(existing) => *existing = rule,
            None => rules.push(rule),
        }
    }

    /// Rules registered for an event name, in registration order
    pub fn rules_for(&self, event_name: &str) -> &[TriggerRule<P>] {
        self.rules.get(event_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dispatch a named event through every rule registered for it
    ///
    /// Fails only when no rules exist for the name at all; a rule resolving
    /// zero subjects is normal operation.
    pub async fn dispatch(
        &self,
        event: &TriggerEvent,
        event_name: &str,
    ) -> Result<(), DispatchError> {
        let rules = self
            .rules
            .get(event_name)
            .ok_or_else(|| DispatchError::UnsupportedEvent(event_name.to_string()))?;

        for rule in rules {
            let Ok(subject) =
                self.resolver
                    .resolve(event, event_name, &rule.workflow, rule.extractor.as_ref())
            else {
                // Already logged by the resolver
                continue;
            };

            let context = match self.contexts.create(subject, &rule.workflow) {
                Ok(context) => context,
                Err(e) => {
                    tracing::error!(
                        workflow = %rule.workflow,
                        event = %event_name,
                        error = %e,
                        "cannot build workflow context"
                    );
                    continue;
                }
            };

            self.execute_safely(event_name, event, rule, &context).await;
        }

        Ok(())
    }

    /// Run the reaction with failures contained to this rule
    async fn execute_safely(
        &self,
        event_name: &str,
        event: &TriggerEvent,
        rule: &TriggerRule<P>,
        context: &WorkflowContext,
    ) {
        let Err(e) = self
            .reaction
            .handle(event_name, event, &rule.payload, context)
            .await
        else {
            return;
        };

        let fields = context.logger_fields();
        match e.severity() {
            Severity::Recoverable => tracing::error!(
                activity = self.reaction.activity(),
                event = %event_name,
                workflow = %fields.workflow,
                subject_kind = %fields.subject_kind,
                subject_id = %fields.subject_id,
                error = %e,
                "reaction failed"
            ),
            Severity::Severe => tracing::error!(
                severity = "critical",
                activity = self.reaction.activity(),
                event = %event_name,
                workflow = %fields.workflow,
                subject_kind = %fields.subject_kind,
                subject_id = %fields.subject_id,
                error = %e,
                "reaction failed"
            ),
        }
    }
}

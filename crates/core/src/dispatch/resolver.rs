// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subject resolution with contained failures

use crate::event::TriggerEvent;
use crate::subject::{SubjectExtractor, SubjectRef};
use thiserror::Error;

/// Why a rule produced no subject
///
/// Resolution failures never abort the dispatch of other rules; the engine
/// skips the rule and moves on.
#[derive(Debug, Error)]
pub enum ResolutionFailure {
    #[error("subject retrieval from '{event}' by {expression} ended with an empty or non-object result")]
    NonObjectResult { event: String, expression: String },
    #[error("cannot retrieve subject from '{event}' by {expression}: {detail}")]
    EvaluationError {
        event: String,
        expression: String,
        detail: String,
    },
}

/// Resolves the workflow subject for one trigger rule
#[derive(Debug, Clone, Default)]
pub struct SubjectResolver;

impl SubjectResolver {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the rule's extractor against the event
    ///
    /// Success requires a non-null object result. Both failure modes are
    /// logged here at error level with the workflow and event names; the
    /// caller only needs to skip the rule.
    pub fn resolve(
        &self,
        event: &TriggerEvent,
        event_name: &str,
        workflow_name: &str,
        extractor: &dyn SubjectExtractor,
    ) -> Result<SubjectRef, ResolutionFailure> {
        let failure = match extractor.evaluate(event) {
            Ok(value) => match SubjectRef::from_value(extractor.subject_kind(), value) {
                Some(subject) => {
                    tracing::debug!(
                        workflow = %workflow_name,
                        event = %event_name,
                        subject_kind = %subject.kind(),
                        "retrieved subject from event"
                    );
                    return Ok(subject);
                }
                None => ResolutionFailure::NonObjectResult {
                    event: event_name.to_string(),
                    expression: extractor.describe(),
                },
            },
            Err(e) => ResolutionFailure::EvaluationError {
                event: event_name.to_string(),
                expression: extractor.describe(),
                detail: e.to_string(),
            },
        };

        tracing::error!(workflow = %workflow_name, event = %event_name, error = %failure, "subject resolution failed");
        Err(failure)
    }
}

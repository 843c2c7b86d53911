// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow execution context
//!
//! The context ties together the resolved workflow instance, the subject it
//! applies to and the subject's stable identifier. It is built once per
//! dispatched rule and never persisted or shared across dispatches.

use crate::subject::{SubjectIdError, SubjectManipulator, SubjectRef};
use std::sync::Arc;
use thiserror::Error;

/// Errors from the external workflow registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no workflow '{workflow}' applies to subject kind '{kind}'")]
    NotFound { workflow: String, kind: String },
    #[error("workflow registry failure: {0}")]
    Backend(String),
}

/// Errors from applying a transition through a workflow handle
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("transition '{transition}' is not enabled for subject '{subject_id}'")]
    TransitionBlocked {
        transition: String,
        subject_id: String,
    },
    #[error("workflow engine failure: {0}")]
    Backend(String),
}

/// Handle to a resolved state-machine instance
///
/// The finite-state-machine engine behind it is an external collaborator;
/// this core only asks it for its name and to check or apply transitions.
pub trait WorkflowHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the transition is currently enabled for the subject
    fn can(&self, subject: &SubjectRef, transition: &str) -> bool;

    /// Apply the transition, returning the updated subject
    fn apply(&self, subject: &SubjectRef, transition: &str) -> Result<SubjectRef, WorkflowError>;
}

/// Looks up the workflow applicable to a subject under a given name
pub trait WorkflowRegistry: Send + Sync {
    fn get(
        &self,
        subject: &SubjectRef,
        workflow_name: &str,
    ) -> Result<Arc<dyn WorkflowHandle>, RegistryError>;
}

/// Structured diagnostic fields identifying a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerFields {
    pub workflow: String,
    pub subject_kind: String,
    pub subject_id: String,
}

/// Immutable execution context for one (event, workflow) pairing
#[derive(Clone)]
pub struct WorkflowContext {
    workflow: Arc<dyn WorkflowHandle>,
    subject: SubjectRef,
    subject_id: String,
}

impl WorkflowContext {
    pub fn new(
        workflow: Arc<dyn WorkflowHandle>,
        subject: SubjectRef,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            workflow,
            subject,
            subject_id: subject_id.into(),
        }
    }

    pub fn workflow(&self) -> &Arc<dyn WorkflowHandle> {
        &self.workflow
    }

    pub fn workflow_name(&self) -> &str {
        self.workflow.name()
    }

    pub fn subject(&self) -> &SubjectRef {
        &self.subject
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Fields for structured diagnostics
    pub fn logger_fields(&self) -> LoggerFields {
        LoggerFields {
            workflow: self.workflow.name().to_string(),
            subject_kind: self.subject.kind().to_string(),
            subject_id: self.subject_id.clone(),
        }
    }
}

impl std::fmt::Debug for WorkflowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowContext")
            .field("workflow", &self.workflow.name())
            .field("subject_kind", &self.subject.kind())
            .field("subject_id", &self.subject_id)
            .finish()
    }
}

/// Errors from building a workflow context
///
/// Collaborator failures pass through unmodified; the dispatch engine's
/// safe-execution boundary is the one that contains them.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    SubjectId(#[from] SubjectIdError),
}

/// Builds workflow contexts from resolved subjects
pub struct ContextFactory {
    registry: Arc<dyn WorkflowRegistry>,
    manipulator: Arc<dyn SubjectManipulator>,
}

impl ContextFactory {
    pub fn new(
        registry: Arc<dyn WorkflowRegistry>,
        manipulator: Arc<dyn SubjectManipulator>,
    ) -> Self {
        Self {
            registry,
            manipulator,
        }
    }

    /// Resolve the workflow instance and subject id for a subject
    pub fn create(
        &self,
        subject: SubjectRef,
        workflow_name: &str,
    ) -> Result<WorkflowContext, ContextError> {
        let workflow = self.registry.get(&subject, workflow_name)?;
        let subject_id = self.manipulator.subject_id(&subject)?;

        Ok(WorkflowContext::new(workflow, subject, subject_id))
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

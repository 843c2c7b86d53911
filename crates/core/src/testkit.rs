// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake collaborators shared across unit tests

use crate::context::{
    ContextFactory, RegistryError, WorkflowContext, WorkflowError, WorkflowHandle,
    WorkflowRegistry,
};
use crate::subject::{FieldIdManipulator, SubjectRef};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fake workflow handle recording applied transitions
pub struct FakeWorkflow {
    name: String,
    enabled: Vec<String>,
    applied: Mutex<Vec<(String, String)>>,
}

impl FakeWorkflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: Vec::new(),
            applied: Mutex::new(Vec::new()),
        }
    }

    pub fn with_enabled(mut self, transitions: &[&str]) -> Self {
        self.enabled = transitions.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Applied (subject id, transition) pairs
    pub fn applied(&self) -> Vec<(String, String)> {
        self.applied.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl WorkflowHandle for FakeWorkflow {
    fn name(&self) -> &str {
        &self.name
    }

    fn can(&self, _subject: &SubjectRef, transition: &str) -> bool {
        self.enabled.iter().any(|t| t == transition)
    }

    fn apply(&self, subject: &SubjectRef, transition: &str) -> Result<SubjectRef, WorkflowError> {
        if !self.can(subject, transition) {
            return Err(WorkflowError::TransitionBlocked {
                transition: transition.to_string(),
                subject_id: subject
                    .field("id")
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            });
        }
        self.applied
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((
                subject
                    .field("id")
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                transition.to_string(),
            ));
        Ok(subject.clone())
    }
}

/// Fake registry serving pre-registered workflows by name
#[derive(Default)]
pub struct FakeRegistry {
    workflows: Mutex<HashMap<String, Arc<FakeWorkflow>>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, workflow: Arc<FakeWorkflow>) {
        self.workflows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(workflow.name.clone(), workflow);
    }
}

impl WorkflowRegistry for FakeRegistry {
    fn get(
        &self,
        subject: &SubjectRef,
        workflow_name: &str,
    ) -> Result<Arc<dyn WorkflowHandle>, RegistryError> {
        self.workflows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(workflow_name)
            .cloned()
            .map(|w| w as Arc<dyn WorkflowHandle>)
            .ok_or_else(|| RegistryError::NotFound {
                workflow: workflow_name.to_string(),
                kind: subject.kind().to_string(),
            })
    }
}

/// Context factory over a single-workflow fake registry
pub fn factory_with(workflow: Arc<FakeWorkflow>) -> ContextFactory {
    let registry = FakeRegistry::new();
    registry.insert(workflow);
    ContextFactory::new(Arc::new(registry), Arc::new(FieldIdManipulator::new()))
}

/// A ready-made context for scheduler tests
pub fn context(workflow_name: &str, subject_kind: &str, subject_id: &str) -> WorkflowContext {
    let workflow = Arc::new(FakeWorkflow::new(workflow_name));
    let subject = SubjectRef::from_value(subject_kind, json!({ "id": subject_id }))
        .unwrap_or_else(|| SubjectRef::new(subject_kind, serde_json::Map::new()));
    WorkflowContext::new(workflow, subject, subject_id)
}

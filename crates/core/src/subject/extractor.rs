// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subject extraction strategies
//!
//! Extraction is a pluggable strategy selected at configuration time rather
//! than a runtime-evaluated expression language. An extractor evaluates the
//! triggering event to a raw value; whether that value qualifies as a subject
//! is the resolver's call.

use crate::event::TriggerEvent;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while evaluating an extractor against an event
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("empty field path")]
    EmptyPath,
    #[error("extraction failed: {0}")]
    Failed(String),
}

/// Strategy for pulling a workflow subject out of a trigger event
pub trait SubjectExtractor: Send + Sync {
    /// Evaluate against the event, producing a raw value
    ///
    /// A missing or non-object result is not an error here; the resolver
    /// classifies it. Errors are reserved for misconfigured or failing
    /// strategies.
    fn evaluate(&self, event: &TriggerEvent) -> Result<Value, ExtractError>;

    /// Concrete domain type attached to subjects this extractor produces
    fn subject_kind(&self) -> &str;

    /// Human-readable description for diagnostics
    fn describe(&self) -> String;
}

/// Extracts the subject at a fixed dotted field path of the event payload
#[derive(Debug, Clone)]
pub struct FieldPathExtractor {
    path: String,
    kind: String,
}

impl FieldPathExtractor {
    pub fn new(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl SubjectExtractor for FieldPathExtractor {
    fn evaluate(&self, event: &TriggerEvent) -> Result<Value, ExtractError> {
        if self.path.is_empty() {
            return Err(ExtractError::EmptyPath);
        }

        // Absent paths evaluate to null, which the resolver rejects as a
        // non-object result.
        Ok(event.lookup(&self.path).cloned().unwrap_or(Value::Null))
    }

    fn subject_kind(&self) -> &str {
        &self.kind
    }

    fn describe(&self) -> String {
        format!("field path '{}'", self.path)
    }
}

/// Extracts the subject through a compiled predicate function
#[derive(Clone)]
pub struct FnExtractor {
    kind: String,
    label: String,
    #[allow(clippy::type_complexity)]
    f: Arc<dyn Fn(&TriggerEvent) -> Result<Value, ExtractError> + Send + Sync>,
}

impl FnExtractor {
    pub fn new<F>(label: impl Into<String>, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(&TriggerEvent) -> Result<Value, ExtractError> + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            label: label.into(),
            f: Arc::new(f),
        }
    }
}

impl SubjectExtractor for FnExtractor {
    fn evaluate(&self, event: &TriggerEvent) -> Result<Value, ExtractError> {
        (self.f)(event)
    }

    fn subject_kind(&self) -> &str {
        &self.kind
    }

    fn describe(&self) -> String {
        format!("function '{}'", self.label)
    }
}

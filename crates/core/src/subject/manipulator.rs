// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subject identifier resolution

use super::SubjectRef;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while resolving a subject's identifier
#[derive(Debug, Error)]
pub enum SubjectIdError {
    #[error("subject of kind '{kind}' has no '{field}' field")]
    MissingField { kind: String, field: String },
    #[error("id field '{field}' of subject kind '{kind}' is not a scalar")]
    NonScalarId { kind: String, field: String },
}

/// Resolves the stable identifier of a workflow subject
pub trait SubjectManipulator: Send + Sync {
    fn subject_id(&self, subject: &SubjectRef) -> Result<String, SubjectIdError>;
}

/// Reads the identifier from a configurable field of the subject
///
/// The field defaults to `id` and can be overridden per subject kind, for
/// domains where e.g. orders identify by `number` but customers by `id`.
#[derive(Debug, Clone)]
pub struct FieldIdManipulator {
    default_field: String,
    overrides: HashMap<String, String>,
}

impl FieldIdManipulator {
    pub fn new() -> Self {
        Self {
            default_field: "id".to_string(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn with_override(mut self, kind: impl Into<String>, field: impl Into<String>) -> Self {
        self.overrides.insert(kind.into(), field.into());
        self
    }

    fn field_for(&self, kind: &str) -> &str {
        self.overrides
            .get(kind)
            .map(String::as_str)
            .unwrap_or(&self.default_field)
    }
}

impl Default for FieldIdManipulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectManipulator for FieldIdManipulator {
    fn subject_id(&self, subject: &SubjectRef) -> Result<String, SubjectIdError> {
        let field = self.field_for(subject.kind());

        match subject.field(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(_) => Err(SubjectIdError::NonScalarId {
                kind: subject.kind().to_string(),
                field: field.to_string(),
            }),
            None => Err(SubjectIdError::MissingField {
                kind: subject.kind().to_string(),
                field: field.to_string(),
            }),
        }
    }
}

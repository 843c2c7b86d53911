// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow subjects and how they are obtained from events
//!
//! This module provides:
//! - **SubjectRef**: an opaque reference to the domain object a workflow tracks
//! - **SubjectExtractor**: pluggable strategies for pulling a subject out of an
//!   event payload
//! - **SubjectManipulator**: resolution of a subject's stable identifier

mod extractor;
mod manipulator;



pub use extractor::{ExtractError, FieldPathExtractor, FnExtractor, SubjectExtractor};
pub use manipulator::{FieldIdManipulator, SubjectIdError, SubjectManipulator};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to the domain object whose state a workflow instance tracks
///
/// Carries the subject's concrete type identifier (`kind`) alongside its
/// data, since job records key on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRef {
    kind: String,
    data: Map<String, Value>,
}

impl SubjectRef {
    pub fn new(kind: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Build a subject from an evaluated value
    ///
    /// Returns `None` unless the value is a JSON object; scalars, arrays and
    /// null never qualify as workflow subjects.
    pub fn from_value(kind: &str, value: Value) -> Option<Self> {
        match value {
            Value::Object(data) => Some(Self::new(kind, data)),
            _ => None,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Read a top-level field of the subject
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled action value object and its argument bag

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A scalar argument value
///
/// The bag is a closed set of scalar kinds so canonical serialization stays
/// deterministic. Variant order matters for untagged deserialization: bool
/// before numbers, numbers before string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Ordered string-to-scalar argument mapping
///
/// Backed by a `BTreeMap`, so iteration and the canonical JSON form are
/// key-ordered and stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionArguments(BTreeMap<String, ArgValue>);

impl ActionArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArgValue)> {
        self.0.iter()
    }

    /// Canonical JSON form for embedding in job command arguments
    ///
    /// An empty bag encodes as `{}`.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl FromIterator<(String, ArgValue)> for ActionArguments {
    fn from_iter<I: IntoIterator<Item = (String, ArgValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Description of a delayed workflow action
///
/// The name uniquely identifies the action kind within a workflow. The offset
/// is relative to scheduling time; `std::time::Duration` cannot be negative,
/// which enforces the non-negativity invariant by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledAction {
    name: String,
    arguments: ActionArguments,
    offset: Duration,
    reschedulable: bool,
}

impl ScheduledAction {
    pub fn new(name: impl Into<String>, offset: Duration) -> Self {
        Self {
            name: name.into(),
            arguments: ActionArguments::new(),
            offset,
            reschedulable: false,
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.insert(key, value);
        self
    }

    pub fn with_arguments(mut self, arguments: ActionArguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Mark the action as reschedulable: a later trigger moves the pending
    /// job's execution time instead of scheduling a second run.
    pub fn reschedulable(mut self) -> Self {
        self.reschedulable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &ActionArguments {
        &self.arguments
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn is_reschedulable(&self) -> bool {
        self.reschedulable
    }
}

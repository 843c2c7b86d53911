// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger event envelope
//!
//! External domain events arrive as structured JSON payloads. The envelope is
//! immutable; subject extractors read from it but never mutate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An external occurrence that may cause a workflow reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    payload: Value,
    occurred_at: DateTime<Utc>,
}

impl TriggerEvent {
    /// Wrap a payload, stamping it with the current time
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            occurred_at: Utc::now(),
        }
    }

    /// Wrap a payload with an explicit occurrence time
    pub fn at(payload: Value, occurred_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            occurred_at,
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Look up a value by dotted field path (e.g. `"order.customer"`)
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.payload;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_nested_objects() {
        let event = TriggerEvent::new(json!({"order": {"customer": {"id": 7}}}));

        assert_eq!(event.lookup("order.customer.id"), Some(&json!(7)));
        assert_eq!(event.lookup("order.customer"), Some(&json!({"id": 7})));
    }

    #[test]
    fn lookup_missing_path_is_none() {
        let event = TriggerEvent::new(json!({"order": {"id": 1}}));

        assert_eq!(event.lookup("order.customer"), None);
        assert_eq!(event.lookup("invoice"), None);
    }

    #[test]
    fn lookup_through_scalar_is_none() {
        let event = TriggerEvent::new(json!({"order": 42}));

        assert_eq!(event.lookup("order.id"), None);
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative trigger configuration
//!
//! Triggers are wired from TOML:
//!
//! ```toml
//! [[trigger]]
//! event = "order.created"
//! workflow = "order_flow"
//! subject = { path = "order", kind = "Order" }
//! transitions = ["activate"]
//!
//! [[trigger.schedule]]
//! action = "expire"
//! offset = "30m"
//! reschedulable = true
//! [trigger.schedule.arguments]
//! reason = "timeout"
//! ```
//!
//! One `[[trigger]]` block yields a transition rule (when it lists
//! transitions) and a schedule rule (when it lists schedules), each feeding
//! the corresponding dispatch engine.

use crate::dispatch::TriggerRule;
use crate::schedule::{ActionArguments, ArgValue, ScheduledAction};
use crate::subject::FieldPathExtractor;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from parsing trigger configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How to extract the subject from the event payload
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectSpec {
    /// Dotted field path into the event payload
    pub path: String,
    /// Concrete domain type of the extracted subject
    pub kind: String,
}

/// One deferred action attached to a trigger
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSpec {
    pub action: String,
    #[serde(with = "humantime_serde")]
    pub offset: Duration,
    #[serde(default)]
    pub reschedulable: bool,
    #[serde(default)]
    pub arguments: BTreeMap<String, ArgValue>,
}

impl ScheduleSpec {
    fn to_action(&self) -> ScheduledAction {
        let arguments: ActionArguments = self
            .arguments
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let action = ScheduledAction::new(&self.action, self.offset).with_arguments(arguments);
        if self.reschedulable {
            action.reschedulable()
        } else {
            action
        }
    }
}

/// One (event, workflow) trigger registration
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerSpec {
    pub event: String,
    pub workflow: String,
    pub subject: SubjectSpec,
    #[serde(default)]
    pub transitions: Vec<String>,
    #[serde(default, rename = "schedule")]
    pub schedules: Vec<ScheduleSpec>,
}

impl TriggerSpec {
    fn extractor(&self) -> Arc<FieldPathExtractor> {
        Arc::new(FieldPathExtractor::new(
            &self.subject.path,
            &self.subject.kind,
        ))
    }

    /// Rule for the transition-applying engine, if transitions are configured
    pub fn transition_rule(&self) -> Option<TriggerRule<Vec<String>>> {
        if self.transitions.is_empty() {
            return None;
        }
        Some(TriggerRule::new(
            &self.workflow,
            self.extractor(),
            self.transitions.clone(),
        ))
    }

    /// Rule for the scheduling engine, if schedules are configured
    pub fn schedule_rule(&self) -> Option<TriggerRule<Vec<ScheduledAction>>> {
        if self.schedules.is_empty() {
            return None;
        }
        Some(TriggerRule::new(
            &self.workflow,
            self.extractor(),
            self.schedules.iter().map(ScheduleSpec::to_action).collect(),
        ))
    }
}

/// Parsed trigger configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggersConfig {
    #[serde(default, rename = "trigger")]
    pub triggers: Vec<TriggerSpec>,
}

impl TriggersConfig {
    /// Rules for the transition engine, in configuration order
    pub fn transition_rules(&self) -> Vec<(String, TriggerRule<Vec<String>>)> {
        self.triggers
            .iter()
            .filter_map(|t| t.transition_rule().map(|r| (t.event.clone(), r)))
            .collect()
    }

    /// Rules for the scheduling engine, in configuration order
    pub fn schedule_rules(&self) -> Vec<(String, TriggerRule<Vec<ScheduledAction>>)> {
        self.triggers
            .iter()
            .filter_map(|t| t.schedule_rule().map(|r| (t.event.clone(), r)))
            .collect()
    }
}

/// Parse trigger configuration from TOML content
pub fn parse_triggers(content: &str) -> Result<TriggersConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

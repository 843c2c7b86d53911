// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records handed to the deferred-execution backend

use super::ScheduledAction;
use crate::context::WorkflowContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Command name of the entry point that later executes a scheduled action
pub const EXECUTE_ACTION_COMMAND: &str = "workflow:action:execute";

/// One deferred unit of work for the external job backend
///
/// Identity is backend-assigned; for scheduling purposes two jobs are the
/// same work when command and arguments match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    command: String,
    args: Vec<String>,
    execute_after: DateTime<Utc>,
}

impl Job {
    pub fn new(
        command: impl Into<String>,
        args: Vec<String>,
        execute_after: DateTime<Utc>,
    ) -> Self {
        Self {
            command: command.into(),
            args,
            execute_after,
        }
    }

    /// Build the job that executes `action` for the context's subject
    ///
    /// Argument order is fixed: action name, canonical argument JSON,
    /// workflow name, subject kind, subject id.
    pub fn for_action(
        action: &ScheduledAction,
        context: &WorkflowContext,
        execute_after: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        let args = vec![
            format!("--action={}", action.name()),
            format!("--arguments={}", action.arguments().to_canonical_json()?),
            format!("--workflow={}", context.workflow_name()),
            format!("--subject-kind={}", context.subject().kind()),
            format!("--subject-id={}", context.subject_id()),
        ];

        Ok(Self::new(EXECUTE_ACTION_COMMAND, args, execute_after))
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn execute_after(&self) -> DateTime<Utc> {
        self.execute_after
    }

    pub fn set_execute_after(&mut self, execute_after: DateTime<Utc>) {
        self.execute_after = execute_after;
    }

    /// Structural equality: same command and arguments, timestamp ignored
    pub fn same_work(&self, other: &Job) -> bool {
        self.command == other.command && self.args == other.args
    }
}

/// Backend-assigned identity of a scheduled job record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledJobId(pub String);

impl ScheduledJobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ScheduledJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup key and uniqueness scope for reschedulable records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleKey {
    pub workflow: String,
    pub action: String,
    pub subject_kind: String,
    pub subject_id: String,
}

impl ScheduleKey {
    pub fn new(
        workflow: impl Into<String>,
        action: impl Into<String>,
        subject_kind: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            workflow: workflow.into(),
            action: action.into(),
            subject_kind: subject_kind.into(),
            subject_id: subject_id.into(),
        }
    }

    pub fn for_context(context: &WorkflowContext, action_name: &str) -> Self {
        Self::new(
            context.workflow_name(),
            action_name,
            context.subject().kind(),
            context.subject_id(),
        )
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.workflow, self.action, self.subject_kind, self.subject_id
        )
    }
}

/// Bookkeeping record correlating a job with its reschedulability
///
/// Created together with its job; only the downstream execution lifecycle
/// removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    id: ScheduledJobId,
    key: ScheduleKey,
    job: Job,
    reschedulable: bool,
}

impl ScheduledJob {
    pub fn new(id: ScheduledJobId, key: ScheduleKey, job: Job, reschedulable: bool) -> Self {
        Self {
            id,
            key,
            job,
            reschedulable,
        }
    }

    pub fn id(&self) -> &ScheduledJobId {
        &self.id
    }

    pub fn key(&self) -> &ScheduleKey {
        &self.key
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn job_mut(&mut self) -> &mut Job {
        &mut self.job
    }

    pub fn is_reschedulable(&self) -> bool {
        self.reschedulable
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reschedule-or-create decision logic
//!
//! A reschedulable action may have at most one pending job per
//! (workflow, action, subject) key; re-triggering moves that job's execution
//! time. Non-reschedulable actions schedule independently on every trigger
//! and never consult the store.

use super::{Job, ScheduleKey, ScheduledAction, ScheduledJobStore, StoreError};
use crate::clock::Clock;
use crate::context::WorkflowContext;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors from scheduling an action
///
/// These always propagate to the caller; a silently dropped schedule is a
/// correctness bug, not a per-event nuisance.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("persistence failure while scheduling: {0}")]
    Store(#[from] StoreError),
    #[error("cannot serialize action arguments: {0}")]
    Arguments(#[from] serde_json::Error),
}

/// Schedules deferred workflow actions
pub struct ActionScheduler<S: ScheduledJobStore, C: Clock> {
    store: S,
    clock: C,
    // Serializes the find-then-write pair per key; the store's unique
    // constraint on reschedulable keys is the second line of defense.
    locks: Mutex<HashMap<ScheduleKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: ScheduledJobStore, C: Clock> ActionScheduler<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule `action` for the context's subject
    ///
    /// Reschedulable actions merge into an existing pending job when one
    /// exists; otherwise (and always for non-reschedulable actions) a new
    /// job plus bookkeeping record is created.
    pub async fn schedule_action(
        &self,
        context: &WorkflowContext,
        action: &ScheduledAction,
    ) -> Result<(), ScheduleError> {
        let execute_after = self.clock.now() + action.offset();
        let key = ScheduleKey::for_context(context, action.name());

        if !action.is_reschedulable() {
            // Every trigger of a non-reschedulable action is independent;
            // no lookup, no lock.
            return self.create_job(&key, action, context, execute_after).await;
        }

        let lock = self.key_lock(&key);
        let _guard = lock.lock().await;

        match self.store.find_reschedulable(&key).await? {
            Some(existing) => {
                self.store
                    .set_execute_after(existing.id(), execute_after)
                    .await?;
                tracing::debug!(
                    job = %existing.id(),
                    workflow = %key.workflow,
                    action = %key.action,
                    subject_id = %key.subject_id,
                    execute_after = %execute_after,
                    "rescheduled pending job"
                );
                Ok(())
            }
            None => self.create_job(&key, action, context, execute_after).await,
        }
    }

    async fn create_job(
        &self,
        key: &ScheduleKey,
        action: &ScheduledAction,
        context: &WorkflowContext,
        execute_after: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), ScheduleError> {
        let job = Job::for_action(action, context, execute_after)?;
        let id = self
            .store
            .create(key, job, action.is_reschedulable())
            .await?;

        tracing::debug!(
            job = %id,
            workflow = %key.workflow,
            action = %key.action,
            subject_id = %key.subject_id,
            execute_after = %execute_after,
            reschedulable = action.is_reschedulable(),
            "scheduled new job"
        );
        Ok(())
    }

    fn key_lock(&self, key: &ScheduleKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(key.clone()).or_default().clone()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence boundary for scheduled jobs

use super::{Job, ScheduleKey, ScheduledJob, ScheduledJobId};
use crate::id::{IdGen, UuidIdGen};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors from the scheduled-job store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("scheduled job '{0}' not found")]
    NotFound(ScheduledJobId),
    #[error("a pending reschedulable job already exists for {0}")]
    DuplicateReschedulable(ScheduleKey),
    #[error("persistence failure: {0}")]
    Backend(String),
}

/// Persistence collaborator for scheduled jobs
///
/// `create` persists the job and its bookkeeping record as one logical unit:
/// neither ever exists without the other. For reschedulable keys the store
/// enforces at most one pending record, mirroring a unique index in a SQL
/// backend.
#[async_trait]
pub trait ScheduledJobStore: Send + Sync + 'static {
    /// Find the pending reschedulable record for the key, if any
    async fn find_reschedulable(
        &self,
        key: &ScheduleKey,
    ) -> Result<Option<ScheduledJob>, StoreError>;

    /// Persist a new job plus its bookkeeping record, returning the assigned id
    async fn create(
        &self,
        key: &ScheduleKey,
        job: Job,
        reschedulable: bool,
    ) -> Result<ScheduledJobId, StoreError>;

    /// Move an existing job's execution time; no new records are created
    async fn set_execute_after(
        &self,
        id: &ScheduledJobId,
        execute_after: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// In-memory store with recorded-call inspection for tests and small setups
#[derive(Clone)]
pub struct MemoryJobStore<G: IdGen = UuidIdGen> {
    jobs: Arc<Mutex<Vec<ScheduledJob>>>,
    find_calls: Arc<Mutex<Vec<ScheduleKey>>>,
    fail_with: Arc<Mutex<Option<String>>>,
    ids: G,
}

impl MemoryJobStore<UuidIdGen> {
    pub fn new() -> Self {
        Self::with_ids(UuidIdGen)
    }
}

impl Default for MemoryJobStore<UuidIdGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGen> MemoryJobStore<G> {
    pub fn with_ids(ids: G) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(Vec::new())),
            find_calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Arc::new(Mutex::new(None)),
            ids,
        }
    }

    /// All persisted records
    pub fn jobs(&self) -> Vec<ScheduledJob> {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Keys passed to `find_reschedulable`, in call order
    pub fn find_calls(&self) -> Vec<ScheduleKey> {
        self.find_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn get(&self, id: &ScheduledJobId) -> Option<ScheduledJob> {
        self.jobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|j| j.id() == id)
            .cloned()
    }

    /// Make every subsequent operation fail with a backend error
    pub fn fail_with(&self, message: impl Into<String>) {
        let mut fail = self.fail_with.lock().unwrap_or_else(|e| e.into_inner());
        *fail = Some(message.into());
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self
            .fail_with
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<G: IdGen + 'static> ScheduledJobStore for MemoryJobStore<G> {
    async fn find_reschedulable(
        &self,
        key: &ScheduleKey,
    ) -> Result<Option<ScheduledJob>, StoreError> {
        self.check_failure()?;
        self.find_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.clone());

        Ok(self
            .jobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|j| j.is_reschedulable() && j.key() == key)
            .cloned())
    }

    async fn create(
        &self,
        key: &ScheduleKey,
        job: Job,
        reschedulable: bool,
    ) -> Result<ScheduledJobId, StoreError> {
        self.check_failure()?;
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());

        // Unique constraint on pending reschedulable keys
        if reschedulable
            && jobs
                .iter()
                .any(|j| j.is_reschedulable() && j.key() == key)
        {
            return Err(StoreError::DuplicateReschedulable(key.clone()));
        }

        let id = ScheduledJobId::new(self.ids.next());
        jobs.push(ScheduledJob::new(
            id.clone(),
            key.clone(),
            job,
            reschedulable,
        ));

        Ok(id)
    }

    async fn set_execute_after(
        &self,
        id: &ScheduledJobId,
        execute_after: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.check_failure()?;
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());

        let record = jobs
            .iter_mut()
            .find(|j| j.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        record.job_mut().set_execute_after(execute_after);

        Ok(())
    }
}

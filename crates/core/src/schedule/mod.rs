// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred action scheduling
//!
//! This module provides:
//! - **ScheduledAction**: the description of a delayed workflow action
//! - **Job / ScheduledJob**: the persisted records handed to the job backend
//! - **ScheduledJobStore**: the persistence collaborator boundary
//! - **ActionScheduler**: reschedule-or-create decision logic

mod action;
mod job;
mod scheduler;
mod store;

#[cfg(test)]
#[path = "action_tests.rs"]
mod action_tests;



pub use action::{ActionArguments, ArgValue, ScheduledAction};
pub use job::{Job, ScheduleKey, ScheduledJob, ScheduledJobId, EXECUTE_ACTION_COMMAND};
pub use scheduler::{ActionScheduler, ScheduleError};
pub use store::{MemoryJobStore, ScheduledJobStore, StoreError};

//! wfx-core: workflow trigger dispatch and deferred action scheduling
//!
//! This crate provides:
//! - An event dispatch engine mapping named domain events to workflow
//!   trigger rules, with per-rule failure isolation
//! - Pluggable subject extraction from event payloads
//! - An action scheduler that merges re-triggered schedules into an
//!   existing pending job instead of duplicating it
//! - Collaborator traits for the workflow registry, subject identification
//!   and job persistence

pub mod clock;
pub mod id;

pub mod config;
pub mod context;
pub mod dispatch;
pub mod event;
pub mod schedule;
pub mod subject;

#[cfg(test)]
mod testkit;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};

pub use config::{parse_triggers, ConfigError, ScheduleSpec, SubjectSpec, TriggerSpec, TriggersConfig};
pub use context::{
    ContextError, ContextFactory, LoggerFields, RegistryError, WorkflowContext, WorkflowError,
    WorkflowHandle, WorkflowRegistry,
};
pub use dispatch::{
    DispatchEngine, DispatchError, Reaction, ReactionError, ResolutionFailure, ScheduleReaction,
    Severity, SubjectResolver, TransitionReaction, TriggerRule,
};
pub use event::TriggerEvent;
pub use schedule::{
    ActionArguments, ActionScheduler, ArgValue, Job, MemoryJobStore, ScheduleError, ScheduleKey,
    ScheduledAction, ScheduledJob, ScheduledJobId, ScheduledJobStore, StoreError,
    EXECUTE_ACTION_COMMAND,
};
pub use subject::{
    ExtractError, FieldIdManipulator, FieldPathExtractor, FnExtractor, SubjectExtractor,
    SubjectIdError, SubjectManipulator, SubjectRef,
};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event dispatch with per-rule failure isolation
//!
//! This module provides:
//! - **SubjectResolver**: turns (event, rule) into a subject, containing
//!   resolution failures
//! - **DispatchEngine**: routes named events through their registered trigger
//!   rules behind a safe-execution boundary
//! - **Reaction**: the injected capability that decides what a listener does
//!   once a context exists, with transition and scheduling variants

mod engine;
mod reaction;
mod resolver;


#[cfg(test)]
#[path = "reaction_tests.rs"]
mod reaction_tests;

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;

pub use engine::{DispatchEngine, DispatchError, TriggerRule};
pub use reaction::{Reaction, ReactionError, ScheduleReaction, Severity, TransitionReaction};
pub use resolver::{ResolutionFailure, SubjectResolver};

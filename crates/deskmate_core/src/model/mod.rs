//! Domain model for the task manager and text-analysis results.
//!
//! # Responsibility
//! - Define canonical data structures shared by core services and callers.
//! - Fix the JSON wire shape persisted by the task store.
//!
//! # Invariants
//! - Every task is identified by a stable, never-reused `TaskId`.
//! - Analysis results are value objects with no identity.

pub mod analysis;
pub mod task;

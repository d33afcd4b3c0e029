//! Core stateful services.
//!
//! # Responsibility
//! - Own mutable domain collections and persist them through injected ports.
//! - Keep UI layers decoupled from storage details.

pub mod task_store;

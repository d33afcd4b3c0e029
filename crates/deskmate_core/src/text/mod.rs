//! Pure text-analysis functions.
//!
//! # Responsibility
//! - Extractive summarization over sentence heuristics.
//! - Lexicon-based sentiment and emotion scoring.
//!
//! # Invariants
//! - Functions are pure: no I/O, no shared state, no panics on any input.
//! - Empty or whitespace-only input yields a defined degenerate result.

pub mod sentiment;
pub mod summarizer;

//! Text-to-speech and speech-to-text session state.
//!
//! # Responsibility
//! - Model the playback (`idle`/`playing`/`paused`) and dictation
//!   (`idle`/`listening`) flows as explicit state machines.
//! - Talk to speech engines only through the injected port traits.
//!
//! # Invariants
//! - A failed port call leaves the session state unchanged.
//! - Engine callbacks (`on_start`, `on_end`, `on_error`) are the only way a
//!   session learns about asynchronous engine progress.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dictation;
pub mod playback;
pub mod voice;

/// Failure reported by a speech engine port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// The host environment has no usable engine.
    Unsupported,
    Engine(String),
}

impl Display for SpeechError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "speech engine is not supported on this platform"),
            Self::Engine(message) => write!(f, "speech engine error: {message}"),
        }
    }
}

impl Error for SpeechError {}

pub type SpeechResult<T> = Result<T, SpeechError>;

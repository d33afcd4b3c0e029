//! Speech-to-text dictation session.
//!
//! # Invariants
//! - Final recognition text is only ever appended to the transcript.
//! - Interim text is replaced on every result and cleared when the engine
//!   stops.

use super::SpeechResult;
use log::{debug, warn};

/// Continuous speech recognition engine port.
pub trait SpeechRecognizer {
    fn start(&mut self) -> SpeechResult<()>;
    fn stop(&mut self) -> SpeechResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictationState {
    #[default]
    Idle,
    Listening,
}

/// Listening state plus the accumulated transcript.
pub struct DictationSession<R: SpeechRecognizer> {
    engine: R,
    state: DictationState,
    transcript: String,
    interim: String,
}

impl<R: SpeechRecognizer> DictationSession<R> {
    pub fn new(engine: R) -> Self {
        Self {
            engine,
            state: DictationState::Idle,
            transcript: String::new(),
            interim: String::new(),
        }
    }

    pub fn state(&self) -> DictationState {
        self.state
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Transcript followed by the not-yet-final tail, as shown while
    /// listening.
    pub fn display_text(&self) -> String {
        format!("{}{}", self.transcript, self.interim)
    }

    pub fn start_listening(&mut self) -> SpeechResult<DictationState> {
        if self.state == DictationState::Listening {
            return Ok(self.state);
        }
        self.engine.start()?;
        self.transition(DictationState::Listening);
        Ok(self.state)
    }

    pub fn stop_listening(&mut self) -> SpeechResult<DictationState> {
        if self.state == DictationState::Idle {
            return Ok(self.state);
        }
        self.engine.stop()?;
        self.transition(DictationState::Idle);
        Ok(self.state)
    }

    /// Applies one recognition batch: `final_text` is committed, `interim_text`
    /// replaces the previous interim tail.
    pub fn on_result(&mut self, final_text: &str, interim_text: &str) {
        self.transcript.push_str(final_text);
        self.interim.clear();
        self.interim.push_str(interim_text);
    }

    pub fn on_end(&mut self) {
        self.interim.clear();
        self.transition(DictationState::Idle);
    }

    pub fn on_error(&mut self, message: &str) {
        warn!("event=stt_error module=speech status=error error={message}");
        self.transition(DictationState::Idle);
    }

    /// Drops the transcript and interim text; listening state is unchanged.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.interim.clear();
    }

    /// Hands the committed transcript to the caller, leaving it empty.
    pub fn take_transcript(&mut self) -> String {
        std::mem::take(&mut self.transcript)
    }

    fn transition(&mut self, next: DictationState) {
        if self.state != next {
            debug!(
                "event=stt_state module=speech from={:?} to={:?}",
                self.state, next
            );
        }
        self.state = next;
    }
}

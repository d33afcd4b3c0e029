//! Text-to-speech playback session.

use super::voice::{VoiceSettings, VoiceSettingsError};
use super::SpeechResult;
use log::{debug, warn};

/// Speech synthesis engine port.
pub trait SpeechSynthesizer {
    /// Queues `text` as a new utterance. Progress is reported back through
    /// `PlaybackSession::on_start` / `on_end` / `on_error`.
    fn speak(&mut self, text: &str, settings: &VoiceSettings) -> SpeechResult<()>;
    fn pause(&mut self) -> SpeechResult<()>;
    fn resume(&mut self) -> SpeechResult<()>;
    /// Drops the current and queued utterances.
    fn cancel(&mut self) -> SpeechResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Play/pause/stop state machine over a `SpeechSynthesizer`.
pub struct PlaybackSession<T: SpeechSynthesizer> {
    engine: T,
    settings: VoiceSettings,
    state: PlaybackState,
}

impl<T: SpeechSynthesizer> PlaybackSession<T> {
    pub fn new(engine: T) -> Self {
        Self {
            engine,
            settings: VoiceSettings::default(),
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    /// Replaces voice settings; applies to the next utterance.
    pub fn set_settings(&mut self, settings: VoiceSettings) -> Result<(), VoiceSettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn engine(&self) -> &T {
        &self.engine
    }

    /// Starts speaking `text`, or resumes if paused.
    ///
    /// Blank text is ignored. A fresh utterance cancels whatever was queued and
    /// drops to `Idle`; the session moves to `Playing` once the engine reports
    /// `on_start`. If the engine then rejects the utterance, the session stays
    /// `Idle`.
    pub fn play(&mut self, text: &str) -> SpeechResult<PlaybackState> {
        if text.trim().is_empty() {
            return Ok(self.state);
        }

        if self.state == PlaybackState::Paused {
            self.engine.resume()?;
            self.transition(PlaybackState::Playing);
            return Ok(self.state);
        }

        self.engine.cancel()?;
        self.transition(PlaybackState::Idle);
        self.engine.speak(text, &self.settings)?;
        debug!(
            "event=tts_speak module=speech status=queued chars={}",
            text.chars().count()
        );
        Ok(self.state)
    }

    /// Pauses an active utterance; no-op in any other state.
    pub fn pause(&mut self) -> SpeechResult<PlaybackState> {
        if self.state == PlaybackState::Playing {
            self.engine.pause()?;
            self.transition(PlaybackState::Paused);
        }
        Ok(self.state)
    }

    /// Cancels playback and returns to `Idle`.
    pub fn stop(&mut self) -> SpeechResult<PlaybackState> {
        self.engine.cancel()?;
        self.transition(PlaybackState::Idle);
        Ok(self.state)
    }

    pub fn on_start(&mut self) {
        self.transition(PlaybackState::Playing);
    }

    pub fn on_end(&mut self) {
        self.transition(PlaybackState::Idle);
    }

    pub fn on_error(&mut self, message: &str) {
        warn!("event=tts_error module=speech status=error error={message}");
        self.transition(PlaybackState::Idle);
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!(
                "event=tts_state module=speech from={:?} to={:?}",
                self.state, next
            );
        }
        self.state = next;
    }
}

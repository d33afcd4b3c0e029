//! Voice settings for speech synthesis.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

pub const RATE_RANGE: RangeInclusive<f64> = 0.5..=2.0;
pub const PITCH_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const VOLUME_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Utterance parameters handed to a `SpeechSynthesizer`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Index into the engine's voice list; engines fall back to their
    /// default voice when out of range.
    pub voice_index: usize,
    pub rate: f64,
    pub pitch: f64,
    pub volume: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_index: 0,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl VoiceSettings {
    /// Checks every numeric field against its supported range.
    pub fn validate(&self) -> Result<(), VoiceSettingsError> {
        check_range("rate", self.rate, &RATE_RANGE)?;
        check_range("pitch", self.pitch, &PITCH_RANGE)?;
        check_range("volume", self.volume, &VOLUME_RANGE)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), VoiceSettingsError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(VoiceSettingsError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoiceSettingsError {
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl Display for VoiceSettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "voice {field} {value} is outside [{min}, {max}]"),
        }
    }
}

impl Error for VoiceSettingsError {}

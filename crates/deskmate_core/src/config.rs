//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe the tunables a host passes to core at startup.
//! - Fill absent fields with defaults and reject out-of-range values.
//!
//! # Invariants
//! - A `CoreConfig` returned by `from_json_str` has passed `validate()`.

use crate::logging::{default_log_level, normalize_level};
use crate::service::task_store::TASKS_KEY;
use crate::speech::voice::{VoiceSettings, VoiceSettingsError};
use crate::text::summarizer::DEFAULT_MAX_SENTENCES;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Sentence budgets offered to users.
pub const SUMMARY_BUDGET_RANGE: RangeInclusive<usize> = 1..=10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub log_level: String,
    pub summary_max_sentences: usize,
    /// Storage key for the task collection.
    pub tasks_key: String,
    pub voice: VoiceSettings,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            summary_max_sentences: DEFAULT_MAX_SENTENCES,
            tasks_key: TASKS_KEY.to_string(),
            voice: VoiceSettings::default(),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        if !SUMMARY_BUDGET_RANGE.contains(&self.summary_max_sentences) {
            return Err(ConfigError::InvalidSummaryBudget(self.summary_max_sentences));
        }
        if self.tasks_key.trim().is_empty() {
            return Err(ConfigError::EmptyTasksKey);
        }
        self.voice.validate()?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidLogLevel(String),
    InvalidSummaryBudget(usize),
    EmptyTasksKey,
    Voice(VoiceSettingsError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidSummaryBudget(value) => write!(
                f,
                "summary_max_sentences {value} is outside [{}, {}]",
                SUMMARY_BUDGET_RANGE.start(),
                SUMMARY_BUDGET_RANGE.end()
            ),
            Self::EmptyTasksKey => write!(f, "tasks_key must not be empty"),
            Self::Voice(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Voice(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VoiceSettingsError> for ConfigError {
    fn from(value: VoiceSettingsError) -> Self {
        Self::Voice(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use crate::service::task_store::TASKS_KEY;

    #[test]
    fn config_file_is_read_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deskmate.json");
        std::fs::write(&path, r#"{"summary_max_sentences": 5, "tasks_key": "work"}"#).unwrap();

        let config = CoreConfig::from_file(&path).unwrap();
        assert_eq!(config.summary_max_sentences, 5);
        assert_eq!(config.tasks_key, "work");

        std::fs::write(&path, r#"{"summary_max_sentences": 11}"#).unwrap();
        assert!(matches!(
            CoreConfig::from_file(&path),
            Err(ConfigError::InvalidSummaryBudget(11))
        ));

        match CoreConfig::from_file(dir.path().join("absent.json")) {
            Err(ConfigError::Read { path, .. }) => assert!(path.ends_with("absent.json")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.summary_max_sentences, 3);
        assert_eq!(config.tasks_key, TASKS_KEY);
    }

    #[test]
    fn partial_voice_section_keeps_other_defaults() {
        let config = CoreConfig::from_json_str(r#"{"voice": {"rate": 1.5}}"#).unwrap();
        assert_eq!(config.voice.rate, 1.5);
        assert_eq!(config.voice.pitch, 1.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"summary_max_sentences": 0}"#).unwrap_err(),
            ConfigError::InvalidSummaryBudget(0)
        ));
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"log_level": "loud"}"#).unwrap_err(),
            ConfigError::InvalidLogLevel(_)
        ));
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"voice": {"volume": 2.0}}"#).unwrap_err(),
            ConfigError::Voice(_)
        ));
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"tasks_key": " "}"#).unwrap_err(),
            ConfigError::EmptyTasksKey
        ));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"theme": "dark"}"#).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}

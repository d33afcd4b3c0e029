//! Core logic for the Deskmate productivity suite.
//! This crate is the single source of truth for business invariants: text
//! analysis, the task manager, and speech session state.

pub mod clock;
pub mod config;
pub mod db;
pub mod id;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod speech;
pub mod text;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use id::{IdGenerator, SequentialIdGenerator, TimeRandomIdGenerator};
pub use kv::memory::MemoryKeyValueStore;
pub use kv::sqlite::SqliteKeyValueStore;
pub use kv::{KeyValueStore, KvError, KvResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::analysis::{Emotion, EmotionScores, SentimentLabel, SentimentResult, SummaryResult};
pub use model::task::{
    Priority, Task, TaskDraft, TaskFilter, TaskId, TaskPatch, TaskStats, TaskValidationError,
    Timestamp,
};
pub use service::task_store::{
    load_tasks, save_tasks, TaskStore, TaskStoreError, TaskStoreResult, TASKS_KEY,
};
pub use speech::dictation::{DictationSession, DictationState, SpeechRecognizer};
pub use speech::playback::{PlaybackSession, PlaybackState, SpeechSynthesizer};
pub use speech::voice::{VoiceSettings, VoiceSettingsError};
pub use speech::{SpeechError, SpeechResult};
pub use text::sentiment::analyze;
pub use text::summarizer::{summarize, DEFAULT_MAX_SENTENCES};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

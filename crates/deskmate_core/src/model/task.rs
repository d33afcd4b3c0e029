//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record plus its add/edit payloads.
//! - Provide filter matching used by list views.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `updated_at >= created_at` for every valid task.
//! - `title` is never blank.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque task identifier produced by an `IdGenerator`.
pub type TaskId = String;

/// Unix epoch milliseconds.
///
/// Persisted as an ISO-8601 UTC string with millisecond precision
/// (`2024-04-01T10:00:00.000Z`); integer millis are also accepted on read.
pub type Timestamp = i64;

/// Task urgency bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Stable lowercase identifier, matching the wire format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a lowercase priority identifier.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Persisted task record.
///
/// Serialized with camelCase keys and ISO-8601 timestamps so collections
/// written by the UI layer load unchanged, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    #[serde(with = "iso_timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "iso_timestamp")]
    pub updated_at: Timestamp,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(normalize_due_date)
}

mod iso_timestamp {
    use super::Timestamp;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        let datetime = DateTime::<Utc>::from_timestamp_millis(*value)
            .ok_or_else(|| ser::Error::custom(format!("timestamp {value} is out of range")))?;
        serializer.serialize_str(&datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(millis) => Ok(millis),
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|datetime| datetime.timestamp_millis())
                .map_err(|err| de::Error::custom(format!("invalid timestamp `{text}`: {err}"))),
        }
    }
}

impl Task {
    /// Builds a fresh, uncompleted task from a draft.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now`.
    /// - `completed` starts as `false`.
    pub fn from_draft(id: TaskId, draft: TaskDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority,
            category: draft.category,
            due_date: normalize_due_date(draft.due_date),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.updated_at < self.created_at {
            return Err(TaskValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Merges every `Some` field of `patch` into this task.
    ///
    /// Does not touch `updated_at`; the store owns timestamp bumps.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = normalize_due_date(due_date);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

// Form inputs submit "" for an unset date.
fn normalize_due_date(value: Option<String>) -> Option<String> {
    value.filter(|date| !date.trim().is_empty())
}

/// Add-form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<String>,
}

impl TaskDraft {
    /// Creates a medium-priority draft with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing task.
///
/// `due_date: Some(None)` clears the due date; `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// List filter; the default value matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring over title or description.
    pub search: String,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle);
        let matches_priority = self.priority.map_or(true, |p| task.priority == p);
        let matches_status = self.completed.map_or(true, |c| task.completed == c);

        matches_search && matches_priority && matches_status
    }
}

/// Completion counters over a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

/// Task invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    BlankTitle,
    UpdatedBeforeCreated {
        created_at: Timestamp,
        updated_at: Timestamp,
    },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({updated_at}) must be >= createdAt ({created_at})"
            ),
        }
    }
}

impl Error for TaskValidationError {}

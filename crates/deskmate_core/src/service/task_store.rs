//! Task manager store.
//!
//! # Responsibility
//! - Hold the task collection in insertion order and expose CRUD + filtering.
//! - Persist the full collection as one JSON blob after every mutation.
//!
//! # Invariants
//! - Task ids are unique within the store.
//! - Every mutation strictly advances the task's `updated_at`.
//! - A missing or corrupt blob loads as an empty collection; a bad record only
//!   drops itself. Both are logged, never surfaced.
//! - A failed write is logged and the in-memory mutation is kept, so memory
//!   and storage may diverge until the next successful save.

use crate::clock::{Clock, SystemClock};
use crate::id::{IdGenerator, TimeRandomIdGenerator};
use crate::kv::{KeyValueStore, KvError};
use crate::model::task::{
    Task, TaskDraft, TaskFilter, TaskId, TaskPatch, TaskStats, TaskValidationError, Timestamp,
};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "productivity-app-tasks";

const MAX_ID_ATTEMPTS: usize = 8;

pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task store failure.
#[derive(Debug)]
pub enum TaskStoreError {
    /// No task with this id exists.
    NotFound(TaskId),
    /// The requested change would break a task invariant.
    Validation(TaskValidationError),
    /// The id generator kept returning ids already in use.
    IdCollision(TaskId),
    Encode(serde_json::Error),
    Persist(KvError),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::IdCollision(id) => write!(f, "could not allocate a unique task id (last `{id}`)"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Persist(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::NotFound(_) | Self::IdCollision(_) => None,
        }
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for TaskStoreError {
    fn from(value: KvError) -> Self {
        Self::Persist(value)
    }
}

/// Reads the task collection stored under `key`.
///
/// Never fails: read errors and blobs that are not a JSON array yield an
/// empty collection. Records are decoded one by one; a record that does not
/// decode, violates task invariants, or repeats an earlier id is skipped.
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<Task> {
    let blob = match store.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=tasks_load module=task_store status=error error_code=read_failed error={err}");
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=tasks_load module=task_store status=error error_code=corrupt_blob blob_bytes={} error={}",
                blob.len(),
                err
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut skipped = 0usize;
    let mut tasks = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let task = match serde_json::from_value::<Task>(record) {
            Ok(task) => task,
            Err(err) => {
                warn!("event=tasks_load module=task_store status=skip error_code=undecodable_record index={index} error={err}");
                skipped += 1;
                continue;
            }
        };
        if task.validate().is_err() || !seen.insert(task.id.clone()) {
            skipped += 1;
            continue;
        }
        tasks.push(task);
    }

    if skipped > 0 {
        warn!("event=tasks_load module=task_store status=partial skipped={skipped}");
    }
    info!(
        "event=tasks_load module=task_store status=ok count={}",
        tasks.len()
    );
    tasks
}

/// Writes the full task collection under `key` as a JSON array.
pub fn save_tasks<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    tasks: &[Task],
) -> TaskStoreResult<()> {
    let blob = serde_json::to_string(tasks).map_err(TaskStoreError::Encode)?;
    store.set(key, &blob)?;
    Ok(())
}

/// In-memory task collection persisted through a key-value port.
pub struct TaskStore<S, G = TimeRandomIdGenerator, C = SystemClock> {
    store: S,
    ids: G,
    clock: C,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads tasks from `store` with random ids and the system clock.
    pub fn open(store: S) -> Self {
        Self::with_parts(store, TimeRandomIdGenerator, SystemClock)
    }
}

impl<S: KeyValueStore, G: IdGenerator, C: Clock> TaskStore<S, G, C> {
    /// Loads tasks stored under [`TASKS_KEY`] using custom id/clock sources.
    pub fn with_parts(store: S, ids: G, clock: C) -> Self {
        Self::with_key(store, ids, clock, TASKS_KEY)
    }

    /// Loads tasks stored under a caller-chosen key.
    pub fn with_key(store: S, ids: G, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = load_tasks(&store, &key);
        Self {
            store,
            ids,
            clock,
            key,
            tasks,
        }
    }

    /// Creates a new uncompleted task from `draft`.
    ///
    /// # Errors
    /// - `Validation(BlankTitle)` when the draft title is blank.
    /// - `IdCollision` when the generator cannot produce an unused id.
    pub fn add(&mut self, draft: TaskDraft) -> TaskStoreResult<Task> {
        if draft.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle.into());
        }

        let id = self.allocate_id()?;
        let task = Task::from_draft(id, draft, self.clock.now_ms());
        self.tasks.push(task.clone());

        info!(
            "event=task_add module=task_store status=ok task_id={} total={}",
            task.id,
            self.tasks.len()
        );
        self.persist();
        Ok(task)
    }

    /// Merges `patch` into the task with `id` and refreshes `updated_at`.
    ///
    /// The task is left untouched if the patched record would be invalid.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> TaskStoreResult<Task> {
        let index = self.position(id)?;
        let mut updated = self.tasks[index].clone();
        updated.apply_patch(patch);
        updated.updated_at = self.next_timestamp(updated.updated_at);
        updated.validate()?;

        self.tasks[index] = updated.clone();
        info!("event=task_update module=task_store status=ok task_id={id}");
        self.persist();
        Ok(updated)
    }

    /// Flips the `completed` flag of the task with `id`.
    pub fn toggle_completed(&mut self, id: &str) -> TaskStoreResult<Task> {
        let index = self.position(id)?;
        let updated_at = self.next_timestamp(self.tasks[index].updated_at);
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        task.updated_at = updated_at;
        let toggled = task.clone();

        info!(
            "event=task_toggle module=task_store status=ok task_id={} completed={}",
            id, toggled.completed
        );
        self.persist();
        Ok(toggled)
    }

    /// Deletes the task with `id`; returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Ok(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);

        info!(
            "event=task_remove module=task_store status=ok task_id={} total={}",
            id,
            self.tasks.len()
        );
        self.persist();
        true
    }

    /// Re-reads the collection from storage, discarding unsaved divergence.
    pub fn reload(&mut self) {
        self.tasks = load_tasks(&self.store, &self.key);
    }
}

impl<S, G, C> TaskStore<S, G, C> {
    /// Returns the task with `id`, if present.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Returns every task matching `filter`, in insertion order.
    pub fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Storage key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow of the backing key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the store, returning the backing key-value store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn position(&self, id: &str) -> TaskStoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| TaskStoreError::NotFound(id.to_string()))
    }
}

impl<S: KeyValueStore, G: IdGenerator, C: Clock> TaskStore<S, G, C> {
    fn allocate_id(&mut self) -> TaskStoreResult<TaskId> {
        let mut last = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.trim().is_empty() && self.get(&candidate).is_none() {
                return Ok(candidate);
            }
            last = candidate;
        }
        Err(TaskStoreError::IdCollision(last))
    }

    // Never returns a value <= `previous`, even if the clock stalls or steps back.
    fn next_timestamp(&self, previous: Timestamp) -> Timestamp {
        self.clock.now_ms().max(previous.saturating_add(1))
    }

    fn persist(&mut self) {
        if let Err(err) = save_tasks(&mut self.store, &self.key, &self.tasks) {
            error!(
                "event=tasks_save module=task_store status=error count={} error={}",
                self.tasks.len(),
                err
            );
        }
    }
}

use deskmate_core::{
    load_tasks, save_tasks, KeyValueStore, KvError, KvResult, ManualClock, MemoryKeyValueStore,
    Priority, SequentialIdGenerator, Task, TaskDraft, TaskFilter, TaskPatch, TaskStore,
    TaskStoreError, TaskValidationError, TASKS_KEY,
};

fn draft(title: &str, priority: Priority) -> TaskDraft {
    TaskDraft {
        priority,
        ..TaskDraft::new(title)
    }
}

fn fixture_store(
    clock: &ManualClock,
) -> TaskStore<MemoryKeyValueStore, SequentialIdGenerator, &ManualClock> {
    TaskStore::with_parts(
        MemoryKeyValueStore::new(),
        SequentialIdGenerator::new("task"),
        clock,
    )
}

#[test]
fn add_then_list_contains_new_uncompleted_task() {
    let clock = ManualClock::new(1_000);
    let mut store = fixture_store(&clock);

    let task = store.add(draft("Buy milk", Priority::Low)).unwrap();
    let listed = store.list(&TaskFilter::default());

    assert_eq!(listed, vec![task.clone()]);
    assert!(!task.completed);
    assert_eq!(task.created_at, 1_000);
    assert_eq!(task.created_at, task.updated_at);
    assert_eq!(task.id, "task-1");
}

#[test]
fn add_rejects_blank_title() {
    let clock = ManualClock::new(0);
    let mut store = fixture_store(&clock);

    let err = store.add(TaskDraft::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        TaskStoreError::Validation(TaskValidationError::BlankTitle)
    ));
    assert!(store.is_empty());
}

#[test]
fn toggle_flips_completion_and_advances_updated_at() {
    let clock = ManualClock::new(1_000);
    let mut store = fixture_store(&clock);
    let task = store.add(TaskDraft::new("Ship release")).unwrap();

    let done = store.toggle_completed(&task.id).unwrap();
    assert!(done.completed);
    assert!(done.updated_at > task.updated_at);
    assert_eq!(done.created_at, task.created_at);

    clock.advance(60_000);
    let reopened = store.toggle_completed(&task.id).unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.updated_at, 61_000);
}

#[test]
fn update_merges_patch_and_refreshes_updated_at() {
    let clock = ManualClock::new(5_000);
    let mut store = fixture_store(&clock);
    let task = store.add(draft("Draft post", Priority::Medium)).unwrap();

    clock.advance(10);
    let updated = store
        .update(
            &task.id,
            TaskPatch {
                title: Some("Publish post".to_string()),
                priority: Some(Priority::High),
                due_date: Some(Some("2026-11-01".to_string())),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.title, "Publish post");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.due_date.as_deref(), Some("2026-11-01"));
    assert_eq!(updated.description, task.description);
    assert_eq!(updated.updated_at, 5_010);
    assert_eq!(store.get(&task.id), Some(&updated));
}

#[test]
fn update_with_blank_title_leaves_task_untouched() {
    let clock = ManualClock::new(0);
    let mut store = fixture_store(&clock);
    let task = store.add(TaskDraft::new("Keep me")).unwrap();

    let err = store
        .update(
            &task.id,
            TaskPatch {
                title: Some(String::new()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, TaskStoreError::Validation(_)));
    assert_eq!(store.get(&task.id), Some(&task));
}

#[test]
fn unknown_id_reports_not_found() {
    let clock = ManualClock::new(0);
    let mut store = fixture_store(&clock);
    store.add(TaskDraft::new("Existing")).unwrap();

    assert!(matches!(
        store.toggle_completed("missing").unwrap_err(),
        TaskStoreError::NotFound(id) if id == "missing"
    ));
    assert!(matches!(
        store.update("missing", TaskPatch::default()).unwrap_err(),
        TaskStoreError::NotFound(_)
    ));
}

#[test]
fn remove_deletes_only_existing_ids() {
    let clock = ManualClock::new(0);
    let mut store = fixture_store(&clock);
    let first = store.add(TaskDraft::new("First")).unwrap();
    let second = store.add(TaskDraft::new("Second")).unwrap();

    assert!(store.remove(&first.id));
    let remaining = store.list(&TaskFilter::default());
    assert_eq!(remaining, vec![second.clone()]);

    assert!(!store.remove("nope"));
    assert!(!store.remove(&first.id));
    assert_eq!(store.list(&TaskFilter::default()), vec![second]);
}

#[test]
fn list_filters_in_insertion_order() {
    let clock = ManualClock::new(0);
    let mut store = fixture_store(&clock);
    let groceries = store.add(draft("Groceries", Priority::Low)).unwrap();
    let report = store
        .add(TaskDraft {
            description: "Quarterly REPORT numbers".to_string(),
            ..draft("Finance", Priority::High)
        })
        .unwrap();
    let review = store.add(draft("Review report", Priority::High)).unwrap();
    store.toggle_completed(&review.id).unwrap();

    let search = TaskFilter {
        search: "report".to_string(),
        ..TaskFilter::default()
    };
    let ids = |tasks: Vec<Task>| tasks.into_iter().map(|task| task.id).collect::<Vec<_>>();
    assert_eq!(ids(store.list(&search)), vec![report.id.clone(), review.id.clone()]);

    let pending_high = TaskFilter {
        priority: Some(Priority::High),
        completed: Some(false),
        ..TaskFilter::default()
    };
    assert_eq!(ids(store.list(&pending_high)), vec![report.id.clone()]);

    let all = ids(store.list(&TaskFilter::default()));
    assert_eq!(all, vec![groceries.id, report.id, review.id]);

    let stats = store.stats();
    assert_eq!((stats.total, stats.completed, stats.pending), (3, 1, 2));
}

#[test]
fn every_mutation_is_persisted_and_reloaded() {
    let clock = ManualClock::new(100);
    let mut store = fixture_store(&clock);
    let keep = store.add(TaskDraft::new("Keep")).unwrap();
    let drop_me = store.add(TaskDraft::new("Drop")).unwrap();
    store.toggle_completed(&keep.id).unwrap();
    store.remove(&drop_me.id);
    let expected = store.tasks().to_vec();

    let backing = store.into_store();
    let reopened = TaskStore::with_parts(backing, SequentialIdGenerator::new("task"), &clock);
    assert_eq!(reopened.tasks(), expected.as_slice());
    assert!(reopened.get(&keep.id).unwrap().completed);
}

#[test]
fn reopened_store_does_not_reuse_existing_ids() {
    let clock = ManualClock::new(0);
    let mut store = fixture_store(&clock);
    store.add(TaskDraft::new("One")).unwrap();

    let mut reopened = TaskStore::with_parts(
        store.into_store(),
        SequentialIdGenerator::new("task"),
        &clock,
    );
    let next = reopened.add(TaskDraft::new("Two")).unwrap();
    assert_eq!(next.id, "task-2");
}

#[test]
fn missing_and_corrupt_blobs_load_as_empty() {
    let mut kv = MemoryKeyValueStore::new();
    assert!(load_tasks(&kv, TASKS_KEY).is_empty());

    kv.set(TASKS_KEY, "{not json").unwrap();
    assert!(load_tasks(&kv, TASKS_KEY).is_empty());

    kv.set(TASKS_KEY, r#"{"id": "object-not-array"}"#).unwrap();
    let store = TaskStore::open(kv);
    assert!(store.is_empty());
}

#[test]
fn load_skips_invalid_and_duplicate_records() {
    let mut kv = MemoryKeyValueStore::new();
    let blob = serde_json::json!([
        {"id": "a", "title": "Valid", "priority": "high", "createdAt": 1, "updatedAt": 2},
        {"id": "a", "title": "Duplicate", "createdAt": 1, "updatedAt": 1},
        {"id": "b", "title": "  ", "createdAt": 1, "updatedAt": 1},
        {"id": "c", "title": "Backwards", "createdAt": 5, "updatedAt": 4},
        {"id": "d", "title": "Unknown priority", "priority": "urgent", "createdAt": 1, "updatedAt": 1},
        {"id": "e", "title": "Bad date", "createdAt": "not a date", "updatedAt": 1},
        {"id": "f", "title": "Kept after bad records", "createdAt": 3, "updatedAt": 3}
    ]);
    kv.set(TASKS_KEY, &blob.to_string()).unwrap();

    let tasks = load_tasks(&kv, TASKS_KEY);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Valid");
    assert_eq!(tasks[1].id, "f");
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[0].category, "");
}

#[test]
fn store_opens_collection_written_by_the_ui() {
    let mut kv = MemoryKeyValueStore::new();
    kv.set(
        TASKS_KEY,
        r#"[{"id":"lq2x8k1abc","title":"Plan week","description":"","completed":false,"priority":"medium","category":"work","dueDate":"","createdAt":"2024-04-01T10:00:00.000Z","updatedAt":"2024-04-01T10:05:00.000Z"}]"#,
    )
    .unwrap();

    let clock = ManualClock::new(1_711_966_000_000);
    let mut store = TaskStore::with_parts(kv, SequentialIdGenerator::new("task"), &clock);
    assert_eq!(store.len(), 1);
    let loaded = store.get("lq2x8k1abc").expect("ui task loaded").clone();
    assert_eq!(loaded.created_at, 1_711_965_600_000);
    assert_eq!(loaded.updated_at, 1_711_965_900_000);
    assert_eq!(loaded.due_date, None);

    store.add(TaskDraft::new("Follow up")).unwrap();

    let reloaded = load_tasks(store.store(), TASKS_KEY);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0], loaded);
    let json: serde_json::Value =
        serde_json::from_str(&store.store().get(TASKS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(json[0]["createdAt"], "2024-04-01T10:00:00.000Z");
}

#[test]
fn save_then_load_round_trips_every_field() {
    let tasks = vec![
        Task {
            id: "x1".to_string(),
            title: "Call bank".to_string(),
            description: "Ask about fees".to_string(),
            completed: true,
            priority: Priority::Low,
            category: "finance".to_string(),
            due_date: Some("2026-12-24".to_string()),
            created_at: 10,
            updated_at: 20,
        },
        Task {
            id: "x2".to_string(),
            title: "Stretch".to_string(),
            description: String::new(),
            completed: false,
            priority: Priority::Medium,
            category: String::new(),
            due_date: None,
            created_at: 30,
            updated_at: 30,
        },
    ];

    let mut kv = MemoryKeyValueStore::new();
    save_tasks(&mut kv, TASKS_KEY, &tasks).unwrap();
    let loaded = load_tasks(&kv, TASKS_KEY);
    assert_eq!(loaded, tasks);

    save_tasks(&mut kv, TASKS_KEY, &loaded).unwrap();
    assert_eq!(load_tasks(&kv, TASKS_KEY), tasks);
}

#[test]
fn task_wire_format_uses_camel_case_keys() {
    let clock = ManualClock::new(42);
    let mut store = fixture_store(&clock);
    store.add(draft("Wire", Priority::High)).unwrap();

    let blob = store.store().get(TASKS_KEY).unwrap().expect("blob saved");
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let record = &json[0];

    assert_eq!(record["id"], "task-1");
    assert_eq!(record["priority"], "high");
    assert_eq!(record["completed"], false);
    assert_eq!(record["createdAt"], "1970-01-01T00:00:00.042Z");
    assert_eq!(record["updatedAt"], "1970-01-01T00:00:00.042Z");
    assert!(record.get("dueDate").is_none());
}

#[test]
fn custom_key_is_used_for_storage() {
    let clock = ManualClock::new(0);
    let mut store = TaskStore::with_key(
        MemoryKeyValueStore::new(),
        SequentialIdGenerator::new("t"),
        &clock,
        "work-tasks",
    );
    store.add(TaskDraft::new("Scoped")).unwrap();

    assert_eq!(store.key(), "work-tasks");
    assert!(store.store().get(TASKS_KEY).unwrap().is_none());
    assert!(store.store().get("work-tasks").unwrap().is_some());
}

struct ReadOnlyStore {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Backend("quota exceeded".to_string()))
    }
}

#[test]
fn write_failure_keeps_in_memory_mutation() {
    let clock = ManualClock::new(0);
    let mut store = TaskStore::with_parts(
        ReadOnlyStore {
            inner: MemoryKeyValueStore::new(),
        },
        SequentialIdGenerator::new("task"),
        &clock,
    );

    let task = store.add(TaskDraft::new("Unsaved")).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.toggle_completed(&task.id).unwrap().completed);

    store.reload();
    assert!(store.is_empty());
}

#[test]
fn save_reports_backend_failure() {
    let mut kv = ReadOnlyStore {
        inner: MemoryKeyValueStore::new(),
    };
    let err = save_tasks(&mut kv, TASKS_KEY, &[]).unwrap_err();
    assert!(matches!(err, TaskStoreError::Persist(KvError::Backend(_))));
}

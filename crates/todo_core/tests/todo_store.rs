use chrono::NaiveDate;
use std::collections::HashSet;
use todo_core::{
    load, open_storage, Category, KeyValueStore, MemoryKeyValueStore, Priority, StoreError,
    TodoDraft, TodoId, TodoStore, TODOS_KEY,
};

fn store() -> TodoStore<MemoryKeyValueStore> {
    TodoStore::open(MemoryKeyValueStore::new())
}

#[test]
fn add_appends_open_todo_and_persists() {
    let mut store = store();
    let draft = TodoDraft::new("Buy milk")
        .with_priority(Priority::Low)
        .with_category(Category::Shopping);

    let todo = store.add_todo(&draft).unwrap();

    assert!(!todo.completed);
    assert_eq!(todo.text, "Buy milk");
    assert_eq!(store.items(), &[todo.clone()]);
    assert_eq!(load(store.storage()), vec![todo]);
}

#[test]
fn blank_text_leaves_collection_unchanged() {
    let mut store = store();
    store.add_todo(&TodoDraft::new("keep")).unwrap();
    let before = store.items().to_vec();

    for text in ["", "   ", "\t\n"] {
        let err = store.add_todo(&TodoDraft::new(text)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    assert_eq!(store.items(), before.as_slice());
    assert_eq!(load(store.storage()), before);
}

#[test]
fn update_replaces_editable_fields_only() {
    let mut store = store();
    let original = store.add_todo_at(&TodoDraft::new("draft"), 1_700_000_000_000).unwrap();
    store.toggle_completed(original.id).unwrap();

    let due = NaiveDate::from_ymd_opt(2026, 12, 24);
    let updated = store
        .update_todo(
            original.id,
            &TodoDraft::new("  final  ")
                .with_priority(Priority::High)
                .with_category(Category::Work)
                .with_due_date(due),
        )
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, 1_700_000_000_000);
    assert!(updated.completed);
    assert_eq!(updated.text, "final");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.category, Category::Work);
    assert_eq!(updated.due_date, due);
}

#[test]
fn update_unknown_id_is_not_found_and_changes_nothing() {
    let mut store = store();
    store.add_todo(&TodoDraft::new("only")).unwrap();
    let before = store.items().to_vec();
    let missing = TodoId::new();

    let err = store.update_todo(missing, &TodoDraft::new("x")).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(store.items(), before.as_slice());
}

#[test]
fn update_keeps_position() {
    let mut store = store();
    let a = store.add_todo(&TodoDraft::new("a")).unwrap();
    let b = store.add_todo(&TodoDraft::new("b")).unwrap();
    let c = store.add_todo(&TodoDraft::new("c")).unwrap();

    store.update_todo(b.id, &TodoDraft::new("b2")).unwrap();
    store.toggle_completed(a.id).unwrap();

    let ids: Vec<TodoId> = store.items().iter().map(|todo| todo.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[test]
fn toggle_twice_restores_completed() {
    let mut store = store();
    let todo = store.add_todo(&TodoDraft::new("flip")).unwrap();

    let first = store.toggle_completed(todo.id).unwrap();
    assert!(first.completed);
    assert!(store.get(todo.id).unwrap().completed);

    let second = store.toggle_completed(todo.id).unwrap();
    assert!(!second.completed);
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let mut store = store();
    let todo = store.add_todo(&TodoDraft::new("gone")).unwrap();

    assert!(store.delete_todo(todo.id).unwrap());
    assert!(!store.delete_todo(todo.id).unwrap());
    assert!(store.items().is_empty());
    assert_eq!(store.storage().get(TODOS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn clear_completed_removes_exactly_completed_in_order() {
    let mut store = store();
    let ids: Vec<TodoId> = (0..5)
        .map(|i| store.add_todo(&TodoDraft::new(format!("t{i}"))).unwrap().id)
        .collect();
    store.toggle_completed(ids[1]).unwrap();
    store.toggle_completed(ids[3]).unwrap();

    assert_eq!(store.clear_completed().unwrap(), 2);

    let remaining: Vec<TodoId> = store.items().iter().map(|todo| todo.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2], ids[4]]);
    assert_eq!(store.clear_completed().unwrap(), 0);
}

#[test]
fn ids_stay_unique_across_mixed_operations() {
    let mut store = store();
    for round in 0..50 {
        let todo = store.add_todo(&TodoDraft::new(format!("item {round}"))).unwrap();
        if round % 3 == 0 {
            store.toggle_completed(todo.id).unwrap();
        }
        if round % 7 == 0 {
            store.delete_todo(todo.id).unwrap();
        }
        if round % 10 == 0 {
            store.clear_completed().unwrap();
        }
    }

    let unique: HashSet<TodoId> = store.items().iter().map(|todo| todo.id).collect();
    assert_eq!(unique.len(), store.items().len());
}

#[test]
fn reload_from_sqlite_file_reproduces_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    let expected = {
        let mut store = TodoStore::open(open_storage(&path).unwrap());
        let a = store.add_todo(&TodoDraft::new("first")).unwrap();
        store.add_todo(&TodoDraft::new("second").with_priority(Priority::High)).unwrap();
        store.add_todo(&TodoDraft::new("third")).unwrap();
        store.toggle_completed(a.id).unwrap();
        store.update_todo(a.id, &TodoDraft::new("first, edited")).unwrap();
        store.items().to_vec()
    };

    let reopened = TodoStore::open(open_storage(&path).unwrap());
    assert_eq!(reopened.items(), expected.as_slice());
}

#[test]
fn malformed_payload_rehydrates_empty() {
    let mut storage = MemoryKeyValueStore::new();
    storage.set(TODOS_KEY, "{not json").unwrap();
    assert!(TodoStore::open(storage).items().is_empty());
}

#[test]
fn payload_with_blank_text_or_duplicate_ids_rehydrates_empty() {
    let mut storage = MemoryKeyValueStore::new();
    storage
        .set(
            TODOS_KEY,
            r#"[{"id":"11111111-2222-4333-8444-555555555555","text":"  ","completed":false,
                "priority":"low","category":"work","dueDate":null,"createdAt":1}]"#,
        )
        .unwrap();
    assert!(load(&storage).is_empty());

    let record = r#"{"id":"11111111-2222-4333-8444-555555555555","text":"dup","completed":false,
        "priority":"low","category":"work","dueDate":null,"createdAt":1}"#;
    storage.set(TODOS_KEY, &format!("[{record},{record}]")).unwrap();
    assert!(load(&storage).is_empty());
}

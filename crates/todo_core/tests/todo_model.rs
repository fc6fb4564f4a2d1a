use chrono::NaiveDate;
use todo_core::{Category, Priority, Todo, TodoDraft, TodoId};
use uuid::Uuid;

#[test]
fn serialization_uses_camel_case_wire_fields() {
    let id = TodoId::from_uuid(Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap());
    let mut todo = Todo::from_draft(
        &TodoDraft::new("File taxes")
            .with_priority(Priority::High)
            .with_category(Category::Other)
            .with_due_date(NaiveDate::from_ymd_opt(2026, 4, 15)),
        1_700_000_000_000,
    )
    .unwrap();
    todo.id = id;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["text"], "File taxes");
    assert_eq!(json["completed"], false);
    assert_eq!(json["priority"], "high");
    assert_eq!(json["category"], "other");
    assert_eq!(json["dueDate"], "2026-04-15");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn missing_optional_fields_take_defaults() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "legacy record",
        "createdAt": 5
    });

    let todo: Todo = serde_json::from_value(value).unwrap();
    assert!(!todo.completed);
    assert_eq!(todo.priority, Priority::Medium);
    assert_eq!(todo.category, Category::Personal);
    assert_eq!(todo.due_date, None);
}

#[test]
fn deserialize_rejects_nil_id() {
    let value = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "text": "nil",
        "createdAt": 5
    });

    let err = serde_json::from_value::<Todo>(value).unwrap_err();
    assert!(err.to_string().contains("nil"), "unexpected error: {err}");
}

#[test]
fn to_draft_round_trips_editable_fields() {
    let draft = TodoDraft::new("Stretch")
        .with_priority(Priority::Low)
        .with_category(Category::Health);
    let todo = Todo::from_draft(&draft, 0).unwrap();
    assert_eq!(todo.to_draft(), draft);
}

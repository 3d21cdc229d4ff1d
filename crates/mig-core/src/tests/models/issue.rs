use crate::SourceIssue;

use serde_json::json;

#[test]
fn test_sparse_issue_decodes() {
    let issue: SourceIssue = serde_json::from_value(json!({ "id": 42 })).unwrap();

    assert_eq!(issue.id, 42);
    assert_eq!(issue.subject, "");
    assert!(issue.description.is_none());
    assert!(issue.tracker.is_none());
    assert!(issue.parent.is_none());
    assert!(issue.start_date.is_none());
}

#[test]
fn test_full_issue_decodes() {
    let issue: SourceIssue = serde_json::from_value(json!({
        "id": 7,
        "subject": "Broken login",
        "description": "Steps to reproduce…",
        "tracker": { "id": 1, "name": "Ошибка" },
        "status": { "id": 2, "name": "В работе" },
        "priority": { "id": 3, "name": "Высокий" },
        "category": { "id": 4, "name": "Backend" },
        "done_ratio": 60,
        "estimated_hours": 2.5,
        "start_date": "2024-03-01",
        "due_date": "2024-03-15",
        "parent": { "id": 6 }
    }))
    .unwrap();

    assert_eq!(issue.subject, "Broken login");
    assert_eq!(issue.tracker.as_ref().unwrap().name.as_deref(), Some("Ошибка"));
    assert_eq!(issue.parent.as_ref().unwrap().id, 6);
    assert!(issue.parent.as_ref().unwrap().name.is_none());
    assert_eq!(issue.done_ratio, Some(60));
    assert_eq!(issue.start_date.unwrap().to_string(), "2024-03-01");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let issue: SourceIssue = serde_json::from_value(json!({
        "id": 9,
        "subject": "With extras",
        "custom_fields": [{ "id": 1, "value": "x" }],
        "spent_hours": 4.0
    }))
    .unwrap();

    assert_eq!(issue.id, 9);
    assert_eq!(issue.subject, "With extras");
}

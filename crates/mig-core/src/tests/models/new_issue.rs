use crate::NewIssue;

use serde_json::json;

#[test]
fn test_unresolved_fields_are_omitted_from_the_wire() {
    let issue = NewIssue {
        project_id: 3,
        subject: "Bare minimum".to_string(),
        ..Default::default()
    };

    let value = serde_json::to_value(&issue).unwrap();

    assert_eq!(value, json!({ "project_id": 3, "subject": "Bare minimum" }));
}

#[test]
fn test_resolved_fields_serialize_by_name() {
    let issue = NewIssue {
        project_id: 3,
        subject: "Full payload".to_string(),
        description: Some("details".to_string()),
        tracker_id: Some(21),
        status_id: Some(1),
        priority_id: Some(2),
        fixed_version_id: Some(5),
        assigned_to_id: Some(12),
        done_ratio: Some(80),
        ..Default::default()
    };

    let value = serde_json::to_value(&issue).unwrap();

    assert_eq!(value["tracker_id"], 21);
    assert_eq!(value["assigned_to_id"], 12);
    assert_eq!(value["done_ratio"], 80);
    assert!(value.get("category_id").is_none());
    assert!(value.get("start_date").is_none());
}

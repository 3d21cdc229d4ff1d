use crate::ReferenceKind;

#[test]
fn test_reference_kind_as_str() {
    assert_eq!(ReferenceKind::Tracker.as_str(), "tracker");
    assert_eq!(ReferenceKind::Status.as_str(), "status");
    assert_eq!(ReferenceKind::Priority.as_str(), "priority");
}

#[test]
fn test_placeholder_name() {
    assert_eq!(ReferenceKind::Tracker.placeholder_name(17), "tracker #17");
    assert_eq!(ReferenceKind::Priority.placeholder_name(4), "priority #4");
}

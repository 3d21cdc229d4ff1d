use crate::target::provenance_note;

use chrono::{TimeZone, Utc};

#[test]
fn test_note_credits_author_and_timestamp() {
    let stamped = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();

    let note = provenance_note("Looks fixed to me.", "Anna Petrova", Some(stamped));

    assert!(note.starts_with("Looks fixed to me."));
    assert!(note.contains("Anna Petrova"));
    assert!(note.contains("2024-03-01 14:30"));
}

#[test]
fn test_note_without_timestamp_still_credits_author() {
    let note = provenance_note("First!", "Boris", None);

    assert!(note.starts_with("First!"));
    assert!(note.contains("Boris"));
    assert!(!note.contains("on )"));
}

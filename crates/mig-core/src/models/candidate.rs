use serde::Deserialize;

/// A named classification record: a target-side tracker, status,
/// priority, or category candidate, or a fetched source-side reference
/// entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Candidate {
    pub fn new<S: Into<String>>(id: u64, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            is_default: false,
        }
    }
}

use crate::models::issue::IssueRef;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One journal entry on a source issue: a comment, a recorded field
/// change, or both. Entries without note text carry nothing worth
/// replaying.
#[derive(Debug, Clone, Deserialize)]
pub struct Journal {
    pub id: u64,
    #[serde(default)]
    pub user: Option<IssueRef>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

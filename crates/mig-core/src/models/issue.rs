use chrono::NaiveDate;
use serde::Deserialize;

/// A reference to a related record as embedded in issue payloads: an
/// `{ "id": 4, "name": "Bug" }` pair whose name may be absent (parent
/// references often carry only the id).
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// One issue as returned by the source tracker.
///
/// Everything except `id` is optional so that sparsely filled records
/// still decode. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceIssue {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracker: Option<IssueRef>,
    #[serde(default)]
    pub status: Option<IssueRef>,
    #[serde(default)]
    pub priority: Option<IssueRef>,
    #[serde(default)]
    pub category: Option<IssueRef>,
    #[serde(default)]
    pub done_ratio: Option<u32>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub parent: Option<IssueRef>,
}

use crate::models::issue::IssueRef;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One attachment record as listed under a source issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    /// Absolute URL the raw bytes are served from.
    pub content_url: String,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<IssueRef>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

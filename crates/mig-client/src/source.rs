use crate::{API_KEY_HEADER, ClientError, ClientResult};

use mig_core::{Attachment, Candidate, Journal, ReferenceKind, SourceIssue};

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Deserialize;

/// Issues are pulled in fixed-size pages at increasing offsets.
pub(crate) const PAGE_SIZE: usize = 100;

/// Read-only client for the source tracker.
///
/// Owns the reference-data caches: each tracker, status, or priority
/// referenced by the issue set is fetched at most once per run, and a
/// failed fetch is cached as a placeholder so mapping stays total.
pub struct SourceClient {
    pub(crate) base_url: String,
    api_key: String,
    version_id: u64,
    client: ReqwestClient,
    trackers: HashMap<u64, Candidate>,
    statuses: HashMap<u64, Candidate>,
    priorities: HashMap<u64, Candidate>,
}

#[derive(Deserialize)]
struct IssuesPage {
    #[serde(default)]
    issues: Vec<SourceIssue>,
}

#[derive(Deserialize)]
struct IssueEnvelope {
    issue: IssueDetail,
}

#[derive(Deserialize)]
struct IssueDetail {
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    journals: Vec<Journal>,
}

#[derive(Deserialize)]
struct TrackerEnvelope {
    tracker: Candidate,
}

#[derive(Deserialize)]
struct StatusEnvelope {
    issue_status: Candidate,
}

#[derive(Deserialize)]
struct PrioritiesEnvelope {
    issue_priorities: Vec<Candidate>,
}

impl SourceClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Tracker URL (e.g., "https://old.example.com")
    /// * `api_key` - Static API key sent in the X-Redmine-API-Key header
    /// * `version_id` - Fixed-version filter selecting the issue set
    pub fn new(
        base_url: &str,
        api_key: &str,
        version_id: u64,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            version_id,
            client,
            trackers: HashMap::new(),
            statuses: HashMap::new(),
            priorities: HashMap::new(),
        })
    }

    /// Build a request with the API key header
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Execute a request, insisting on 200 and returning the body text.
    async fn execute(&self, req: reqwest::RequestBuilder) -> ClientResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(ClientError::status(status, &url, body));
        }

        Ok(body)
    }

    // =========================================================================
    // Issue Operations
    // =========================================================================

    /// Fetch every issue matching the configured version filter.
    ///
    /// Pages of [`PAGE_SIZE`] are requested at increasing offsets until a
    /// short (or empty) page arrives; source order is preserved. Any page
    /// failing fails the whole fetch - a partial issue list must never
    /// look like a complete one.
    pub async fn fetch_all_issues(&self) -> ClientResult<Vec<SourceIssue>> {
        let mut all = Vec::new();
        let mut offset = 0usize;

        loop {
            let page = self.fetch_issue_page(offset).await?;
            let count = page.len();
            all.extend(page);

            if count < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        debug!("fetched {} issues from {}", all.len(), self.base_url);
        Ok(all)
    }

    async fn fetch_issue_page(&self, offset: usize) -> ClientResult<Vec<SourceIssue>> {
        let req = self.request(Method::GET, "/issues.json").query(&[
            ("fixed_version_id", self.version_id.to_string()),
            ("limit", PAGE_SIZE.to_string()),
            ("offset", offset.to_string()),
            (
                "include",
                "attachments,relations,children,journals".to_string(),
            ),
        ]);

        let body = self.execute(req).await?;
        let page: IssuesPage = serde_json::from_str(&body)?;

        Ok(page.issues)
    }

    // =========================================================================
    // Reference Data Operations
    // =========================================================================

    /// Look up a reference entity by id, fetching and caching it on first
    /// use.
    ///
    /// Never fails: when the fetch errors or the entity is gone, a
    /// placeholder named "<kind> #<id>" is cached instead, so the mapper
    /// always has a name to compare.
    pub async fn fetch_reference(&mut self, kind: ReferenceKind, id: u64) -> Candidate {
        if let Some(record) = self.reference_cache(kind).get(&id) {
            return record.clone();
        }

        let record = match self.fetch_reference_remote(kind, id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(
                    "{} #{} does not exist on the source side; using placeholder",
                    kind.as_str(),
                    id
                );
                Candidate::new(id, kind.placeholder_name(id))
            }
            Err(e) => {
                warn!(
                    "{} #{} could not be fetched ({}); using placeholder",
                    kind.as_str(),
                    id,
                    e
                );
                Candidate::new(id, kind.placeholder_name(id))
            }
        };

        self.reference_cache(kind).insert(id, record.clone());
        record
    }

    fn reference_cache(&mut self, kind: ReferenceKind) -> &mut HashMap<u64, Candidate> {
        match kind {
            ReferenceKind::Tracker => &mut self.trackers,
            ReferenceKind::Status => &mut self.statuses,
            ReferenceKind::Priority => &mut self.priorities,
        }
    }

    async fn fetch_reference_remote(
        &self,
        kind: ReferenceKind,
        id: u64,
    ) -> ClientResult<Option<Candidate>> {
        match kind {
            ReferenceKind::Tracker => {
                let req = self.request(Method::GET, &format!("/trackers/{}.json", id));
                let body = self.execute(req).await?;
                let envelope: TrackerEnvelope = serde_json::from_str(&body)?;

                Ok(Some(envelope.tracker))
            }
            ReferenceKind::Status => {
                let req = self.request(Method::GET, &format!("/issue_statuses/{}.json", id));
                let body = self.execute(req).await?;
                let envelope: StatusEnvelope = serde_json::from_str(&body)?;

                Ok(Some(envelope.issue_status))
            }
            ReferenceKind::Priority => {
                // Priorities have no per-id endpoint; filter the full
                // enumeration instead.
                let req = self.request(Method::GET, "/enumerations/issue_priorities.json");
                let body = self.execute(req).await?;
                let envelope: PrioritiesEnvelope = serde_json::from_str(&body)?;

                Ok(envelope.issue_priorities.into_iter().find(|p| p.id == id))
            }
        }
    }

    // =========================================================================
    // Attachment and Journal Operations
    // =========================================================================

    /// Attachments listed under one issue; failures are logged and yield
    /// no items.
    pub async fn fetch_attachments(&self, issue_id: u64) -> Vec<Attachment> {
        match self.fetch_issue_detail(issue_id, "attachments").await {
            Ok(detail) => detail.attachments,
            Err(e) => {
                warn!("could not fetch attachments of issue #{}: {}", issue_id, e);
                Vec::new()
            }
        }
    }

    /// Journal entries of one issue; failures are logged and yield no
    /// items.
    pub async fn fetch_journals(&self, issue_id: u64) -> Vec<Journal> {
        match self.fetch_issue_detail(issue_id, "journals").await {
            Ok(detail) => detail.journals,
            Err(e) => {
                warn!("could not fetch journals of issue #{}: {}", issue_id, e);
                Vec::new()
            }
        }
    }

    async fn fetch_issue_detail(&self, issue_id: u64, include: &str) -> ClientResult<IssueDetail> {
        let req = self
            .request(Method::GET, &format!("/issues/{}.json", issue_id))
            .query(&[("include", include)]);

        let body = self.execute(req).await?;
        let envelope: IssueEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.issue)
    }

    /// Download an attachment body from its (absolute) content URL.
    pub async fn download_attachment(&self, content_url: &str) -> ClientResult<Bytes> {
        let response = self
            .client
            .get(content_url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status, &url, body));
        }

        Ok(response.bytes().await?)
    }
}

use crate::endpoint::Endpoint;
use crate::{API_KEY_HEADER, ClientError, ClientResult};

use mig_core::{Candidate, NewIssue};

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::{Deserialize, Serialize};

/// Write client for the target tracker.
pub struct TargetClient {
    pub(crate) base_url: String,
    api_key: String,
    client: ReqwestClient,
}

impl TargetClient {
    /// Create a new client against a resolved endpoint.
    pub fn new(
        endpoint: &Endpoint,
        api_key: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: endpoint.base_url(),
            api_key: api_key.to_string(),
            client,
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

    /// Shared 200/204 check for the issue-update calls.
    async fn expect_updated(&self, response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::status(status, &url, body))
    }

    // =========================================================================
    // Issue Operations
    // =========================================================================

    /// Create an issue, returning its new id. Only HTTP 201 counts as
    /// success; anything else is an error carrying the response body.
    pub async fn create_issue(&self, issue: &NewIssue) -> ClientResult<u64> {
        #[derive(Serialize)]
        struct CreateRequest<'a> {
            issue: &'a NewIssue,
        }

        #[derive(Deserialize)]
        struct CreatedEnvelope {
            issue: CreatedIssue,
        }

        #[derive(Deserialize)]
        struct CreatedIssue {
            id: u64,
        }

        let response = self
            .request(Method::POST, "/issues.json")
            .json(&CreateRequest { issue })
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if status != StatusCode::CREATED {
            return Err(ClientError::status(status, &url, body));
        }

        let created: CreatedEnvelope = serde_json::from_str(&body)?;
        debug!("created issue #{} ({:?})", created.issue.id, issue.subject);

        Ok(created.issue.id)
    }

    /// Point a created issue at its parent.
    pub async fn set_parent(&self, child_id: u64, parent_id: u64) -> ClientResult<()> {
        #[derive(Serialize)]
        struct ParentRequest {
            issue: ParentFields,
        }

        #[derive(Serialize)]
        struct ParentFields {
            parent_issue_id: u64,
        }

        let body = ParentRequest {
            issue: ParentFields {
                parent_issue_id: parent_id,
            },
        };

        let response = self
            .request(Method::PUT, &format!("/issues/{}.json", child_id))
            .json(&body)
            .send()
            .await?;

        self.expect_updated(response).await
    }

    // =========================================================================
    // Attachment Operations
    // =========================================================================

    /// First half of the attachment protocol: push raw bytes, get back a
    /// one-time token.
    ///
    /// The body always goes up as `application/octet-stream` regardless
    /// of the original file's type; the upload endpoint takes an opaque
    /// byte stream and content classification happens at attach time.
    pub async fn upload(&self, data: Bytes, filename: &str) -> ClientResult<String> {
        #[derive(Deserialize)]
        struct UploadEnvelope {
            upload: UploadBody,
        }

        #[derive(Deserialize)]
        struct UploadBody {
            token: String,
        }

        let response = self
            .request(Method::POST, "/uploads.json")
            .query(&[("filename", sanitize_filename(filename))])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(ClientError::upload_rejected(status));
        }

        let body = response.text().await?;
        let envelope: UploadEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.upload.token)
    }

    /// Second half: bind an uploaded token to an issue, restoring the
    /// original filename and content type.
    pub async fn attach(
        &self,
        issue_id: u64,
        token: &str,
        filename: &str,
        content_type: &str,
        description: &str,
    ) -> ClientResult<()> {
        #[derive(Serialize)]
        struct AttachRequest<'a> {
            issue: AttachFields<'a>,
        }

        #[derive(Serialize)]
        struct AttachFields<'a> {
            uploads: [UploadRef<'a>; 1],
        }

        #[derive(Serialize)]
        struct UploadRef<'a> {
            token: &'a str,
            filename: &'a str,
            content_type: &'a str,
            description: &'a str,
        }

        let body = AttachRequest {
            issue: AttachFields {
                uploads: [UploadRef {
                    token,
                    filename,
                    content_type,
                    description,
                }],
            },
        };

        let response = self
            .request(Method::PUT, &format!("/issues/{}.json", issue_id))
            .json(&body)
            .send()
            .await?;

        self.expect_updated(response).await
    }

    // =========================================================================
    // Note Operations
    // =========================================================================

    /// Replay a journal note onto an issue. The note is written under the
    /// ambient API identity, so the original author and timestamp are
    /// credited in the text itself.
    pub async fn append_note(
        &self,
        issue_id: u64,
        text: &str,
        author: &str,
        stamped_on: Option<DateTime<Utc>>,
    ) -> ClientResult<()> {
        #[derive(Serialize)]
        struct NoteRequest<'a> {
            issue: NoteFields<'a>,
        }

        #[derive(Serialize)]
        struct NoteFields<'a> {
            notes: &'a str,
        }

        let notes = provenance_note(text, author, stamped_on);
        let body = NoteRequest {
            issue: NoteFields { notes: &notes },
        };

        let response = self
            .request(Method::PUT, &format!("/issues/{}.json", issue_id))
            .json(&body)
            .send()
            .await?;

        self.expect_updated(response).await
    }

    // =========================================================================
    // Vocabulary Operations
    // =========================================================================

    /// Trackers enabled on one project.
    pub async fn project_trackers(&self, project_id: u64) -> ClientResult<Vec<Candidate>> {
        #[derive(Deserialize)]
        struct ProjectEnvelope {
            project: ProjectDetail,
        }

        #[derive(Deserialize)]
        struct ProjectDetail {
            #[serde(default)]
            trackers: Vec<Candidate>,
        }

        let req = self
            .request(Method::GET, &format!("/projects/{}.json", project_id))
            .query(&[("include", "trackers")]);

        let body = self.execute(req).await?;
        let envelope: ProjectEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.project.trackers)
    }

    /// Every tracker the target system knows.
    pub async fn all_trackers(&self) -> ClientResult<Vec<Candidate>> {
        #[derive(Deserialize)]
        struct TrackersEnvelope {
            #[serde(default)]
            trackers: Vec<Candidate>,
        }

        let req = self.request(Method::GET, "/trackers.json");
        let body = self.execute(req).await?;
        let envelope: TrackersEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.trackers)
    }

    /// Every issue status the target system knows.
    pub async fn statuses(&self) -> ClientResult<Vec<Candidate>> {
        #[derive(Deserialize)]
        struct StatusesEnvelope {
            #[serde(default)]
            issue_statuses: Vec<Candidate>,
        }

        let req = self.request(Method::GET, "/issue_statuses.json");
        let body = self.execute(req).await?;
        let envelope: StatusesEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.issue_statuses)
    }

    /// Every issue priority the target system knows.
    pub async fn priorities(&self) -> ClientResult<Vec<Candidate>> {
        #[derive(Deserialize)]
        struct PrioritiesEnvelope {
            #[serde(default)]
            issue_priorities: Vec<Candidate>,
        }

        let req = self.request(Method::GET, "/enumerations/issue_priorities.json");
        let body = self.execute(req).await?;
        let envelope: PrioritiesEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.issue_priorities)
    }

    /// Issue categories of one project.
    pub async fn categories(&self, project_id: u64) -> ClientResult<Vec<Candidate>> {
        #[derive(Deserialize)]
        struct CategoriesEnvelope {
            #[serde(default)]
            issue_categories: Vec<Candidate>,
        }

        let req = self.request(
            Method::GET,
            &format!("/projects/{}/issue_categories.json", project_id),
        );
        let body = self.execute(req).await?;
        let envelope: CategoriesEnvelope = serde_json::from_str(&body)?;

        Ok(envelope.issue_categories)
    }

    /// Create an issue category in one project, returning its new id.
    pub async fn create_category(&self, project_id: u64, name: &str) -> ClientResult<u64> {
        #[derive(Serialize)]
        struct CategoryRequest<'a> {
            issue_category: CategoryFields<'a>,
        }

        #[derive(Serialize)]
        struct CategoryFields<'a> {
            name: &'a str,
        }

        #[derive(Deserialize)]
        struct CategoryEnvelope {
            issue_category: CreatedCategory,
        }

        #[derive(Deserialize)]
        struct CreatedCategory {
            id: u64,
        }

        let body = CategoryRequest {
            issue_category: CategoryFields { name },
        };

        let response = self
            .request(
                Method::POST,
                &format!("/projects/{}/issue_categories.json", project_id),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        if status != StatusCode::CREATED {
            return Err(ClientError::status(status, &url, text));
        }

        let envelope: CategoryEnvelope = serde_json::from_str(&text)?;

        Ok(envelope.issue_category.id)
    }
}

/// Upload filenames keep ASCII alphanumerics, `.`, `_`, and `-`; every
/// other character becomes `_` so the filename survives the query string.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The replayed note text plus a provenance line naming who wrote it and
/// when.
pub(crate) fn provenance_note(text: &str, author: &str, stamped_on: Option<DateTime<Utc>>) -> String {
    match stamped_on {
        Some(when) => format!(
            "{}\n\n_(migrated note, originally by {} on {})_",
            text,
            author,
            when.format("%Y-%m-%d %H:%M")
        ),
        None => format!("{}\n\n_(migrated note, originally by {})_", text, author),
    }
}

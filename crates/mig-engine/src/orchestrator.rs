use crate::mapper::FieldMapper;
use crate::report::TransferReport;
use crate::{EngineError, EngineResult};

use mig_client::{ClientResult, SourceClient, TargetClient, resolve_endpoint};
use mig_config::{Config, ItemErrorPolicy};
use mig_core::{Attachment, NewIssue, SourceIssue};

use std::collections::HashMap;

use log::{debug, info, warn};

/// A deferred hierarchy link: a created child waiting for its parent's
/// target id to become known.
struct ParentLink {
    child_source_id: u64,
    child_target_id: u64,
    parent_source_id: u64,
}

/// Drives one transfer run through its three phases: create every issue,
/// then link the hierarchy, then replicate attachments and notes.
///
/// All per-run state (mapping caches, created-issues map) lives on the
/// engine and nothing is persisted across runs, so re-running the same
/// transfer creates a second, independent copy of the data.
pub struct TransferEngine {
    source: SourceClient,
    target: TargetClient,
    mapper: FieldMapper,
    policy: ItemErrorPolicy,
    project_id: u64,
    version_id: u64,
    // source issue id -> created target issue id
    created: HashMap<u64, u64>,
    pending_links: Vec<ParentLink>,
}

impl TransferEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: &Config) -> EngineResult<Self> {
        let endpoint = resolve_endpoint(&config.target.endpoint, config.target.secure);
        info!("target endpoint resolved to {}", endpoint.base_url());

        let source = SourceClient::new(
            &config.source.url,
            &config.source.api_key,
            config.source.version_id,
            config.http.connect_timeout(),
            config.http.timeout(),
        );
        let source = match source {
            Ok(client) => client,
            Err(e) => return Err(EngineError::setup(e)),
        };

        let target = TargetClient::new(
            &endpoint,
            &config.target.api_key,
            config.http.connect_timeout(),
            config.http.timeout(),
        );
        let target = match target {
            Ok(client) => client,
            Err(e) => return Err(EngineError::setup(e)),
        };

        Ok(Self {
            source,
            target,
            mapper: FieldMapper::new(config.target.project_id, config.target.fallback_assignee_id),
            policy: config.transfer.on_item_error,
            project_id: config.target.project_id,
            version_id: config.target.version_id,
            created: HashMap::new(),
            pending_links: Vec::new(),
        })
    }

    /// Execute the full transfer.
    ///
    /// Consumes the engine: the per-run caches make an instance
    /// single-use. Only a failed issue-list fetch (or the abort policy)
    /// ends the run early.
    pub async fn run(mut self) -> EngineResult<TransferReport> {
        let issues = match self.source.fetch_all_issues().await {
            Ok(issues) => issues,
            Err(e) => return Err(EngineError::fetch(e)),
        };
        info!("fetched {} issues from the source tracker", issues.len());

        let mut report = TransferReport::default();

        self.create_all(&issues, &mut report).await?;
        self.link_hierarchy(&mut report).await?;
        self.replicate_all(&issues, &mut report).await;

        info!(
            "transfer finished: {} created, {} skipped, {} parent links, {} attachments, {} notes",
            report.created, report.skipped, report.linked, report.attachments, report.notes
        );

        Ok(report)
    }

    // =========================================================================
    // Phase 1 - Create
    // =========================================================================

    async fn create_all(
        &mut self,
        issues: &[SourceIssue],
        report: &mut TransferReport,
    ) -> EngineResult<()> {
        info!(
            "creating {} issues in target project #{}",
            issues.len(),
            self.project_id
        );

        for issue in issues {
            let fields = self.resolve_fields(issue).await;

            match self.target.create_issue(&fields).await {
                Ok(target_id) => {
                    self.created.insert(issue.id, target_id);
                    report.created += 1;

                    if let Some(parent) = &issue.parent {
                        self.pending_links.push(ParentLink {
                            child_source_id: issue.id,
                            child_target_id: target_id,
                            parent_source_id: parent.id,
                        });
                    }
                }
                Err(e) => {
                    warn!("issue #{} was not created: {}", issue.id, e);
                    report.skipped += 1;

                    if self.policy == ItemErrorPolicy::Abort {
                        return Err(EngineError::aborted(issue.id, e));
                    }
                }
            }
        }

        Ok(())
    }

    /// Translate one source issue into the target create payload.
    ///
    /// Total by construction: classification fields that cannot be
    /// resolved are omitted from the payload instead of failing the
    /// issue.
    async fn resolve_fields(&mut self, issue: &SourceIssue) -> NewIssue {
        let tracker_id = match &issue.tracker {
            Some(tracker) => {
                self.mapper
                    .map_tracker(&mut self.source, &self.target, tracker.id)
                    .await
            }
            None => None,
        };

        let status_id = match &issue.status {
            Some(status) => {
                self.mapper
                    .map_status(&mut self.source, &self.target, status.id)
                    .await
            }
            None => None,
        };

        let priority_id = match &issue.priority {
            Some(priority) => {
                self.mapper
                    .map_priority(&mut self.source, &self.target, priority.id)
                    .await
            }
            None => None,
        };

        let category_id = match issue.category.as_ref().and_then(|c| c.name.as_deref()) {
            Some(name) => self.mapper.map_category(&self.target, name).await,
            None => None,
        };

        NewIssue {
            project_id: self.project_id,
            subject: issue.subject.clone(),
            description: issue.description.clone(),
            tracker_id,
            status_id,
            priority_id,
            category_id,
            fixed_version_id: Some(self.version_id),
            assigned_to_id: Some(self.mapper.map_assignee()),
            done_ratio: issue.done_ratio,
            estimated_hours: issue.estimated_hours,
            start_date: issue.start_date,
            due_date: issue.due_date,
        }
    }

    // =========================================================================
    // Phase 2 - Link Hierarchy
    // =========================================================================

    /// Set the recorded parent relations, now that every issue that could
    /// be created exists and has a target id. Deferring this to a second
    /// phase makes child-before-parent source order a non-problem.
    async fn link_hierarchy(&mut self, report: &mut TransferReport) -> EngineResult<()> {
        info!("linking {} recorded parent relations", self.pending_links.len());

        for link in &self.pending_links {
            let Some(&parent_target_id) = self.created.get(&link.parent_source_id) else {
                debug!(
                    "issue #{}: source parent #{} was not created; leaving unparented",
                    link.child_source_id, link.parent_source_id
                );
                continue;
            };

            match self
                .target
                .set_parent(link.child_target_id, parent_target_id)
                .await
            {
                Ok(()) => report.linked += 1,
                Err(e) => {
                    warn!(
                        "could not set parent of issue #{}: {}",
                        link.child_source_id, e
                    );

                    if self.policy == ItemErrorPolicy::Abort {
                        return Err(EngineError::aborted(link.child_source_id, e));
                    }
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Phase 3 - Replicate Attachments and Notes
    // =========================================================================

    /// Copy attachments and journal notes for every created issue.
    /// Best-effort throughout: failures are logged per item and never end
    /// the run, regardless of policy.
    async fn replicate_all(&self, issues: &[SourceIssue], report: &mut TransferReport) {
        info!(
            "replicating attachments and notes for {} created issues",
            self.created.len()
        );

        for issue in issues {
            let Some(&target_id) = self.created.get(&issue.id) else {
                continue;
            };

            self.replicate_attachments(issue.id, target_id, report).await;
            self.replicate_notes(issue.id, target_id, report).await;
        }
    }

    async fn replicate_attachments(
        &self,
        source_id: u64,
        target_id: u64,
        report: &mut TransferReport,
    ) {
        for attachment in self.source.fetch_attachments(source_id).await {
            match self.transfer_attachment(target_id, &attachment).await {
                Ok(()) => report.attachments += 1,
                Err(e) => warn!(
                    "attachment {:?} of issue #{} was not transferred: {}",
                    attachment.filename, source_id, e
                ),
            }
        }
    }

    /// Download, upload, attach. Each attachment stands alone: a broken
    /// download or rejected upload skips that file only.
    async fn transfer_attachment(
        &self,
        target_id: u64,
        attachment: &Attachment,
    ) -> ClientResult<()> {
        let data = self.source.download_attachment(&attachment.content_url).await?;
        let token = self.target.upload(data, &attachment.filename).await?;

        self.target
            .attach(
                target_id,
                &token,
                &attachment.filename,
                attachment
                    .content_type
                    .as_deref()
                    .unwrap_or("application/octet-stream"),
                attachment.description.as_deref().unwrap_or(""),
            )
            .await
    }

    async fn replicate_notes(&self, source_id: u64, target_id: u64, report: &mut TransferReport) {
        for journal in self.source.fetch_journals(source_id).await {
            // Entries that only record field changes have no text to replay
            let Some(notes) = journal.notes.as_deref().filter(|n| !n.trim().is_empty()) else {
                continue;
            };

            let author = journal
                .user
                .as_ref()
                .and_then(|u| u.name.as_deref())
                .unwrap_or("an unknown user");

            match self
                .target
                .append_note(target_id, notes, author, journal.created_on)
                .await
            {
                Ok(()) => report.notes += 1,
                Err(e) => warn!(
                    "note #{} of issue #{} was not replayed: {}",
                    journal.id, source_id, e
                ),
            }
        }
    }
}

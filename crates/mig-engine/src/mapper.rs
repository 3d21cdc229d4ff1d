use crate::keywords::{KeywordGroup, PRIORITY_GROUPS, STATUS_GROUPS, TRACKER_GROUPS, keyword_match};

use mig_client::{ClientResult, SourceClient, TargetClient};
use mig_core::{Candidate, ReferenceKind};

use std::collections::HashMap;

use log::{debug, warn};

/// Seeded "Normal" priority slot, used only when the target exposes no
/// priorities at all.
const FALLBACK_PRIORITY_ID: u64 = 2;

/// Resolves source classification values into target-system ids.
///
/// Every resolution is memoized per source id for the lifetime of one
/// run, fallbacks included: a given source value maps identically across
/// the whole issue set and costs one heuristic pass. Target vocabulary
/// lists are fetched lazily, once per kind.
pub struct FieldMapper {
    project_id: u64,
    fallback_assignee_id: u64,

    // source id -> resolved target id; None records that even the
    // fallback chain came up empty
    tracker_ids: HashMap<u64, Option<u64>>,
    status_ids: HashMap<u64, Option<u64>>,
    priority_ids: HashMap<u64, Option<u64>>,

    project_trackers: Option<Vec<Candidate>>,
    all_trackers: Option<Vec<Candidate>>,
    statuses: Option<Vec<Candidate>>,
    priorities: Option<Vec<Candidate>>,
}

impl FieldMapper {
    pub fn new(project_id: u64, fallback_assignee_id: u64) -> Self {
        Self {
            project_id,
            fallback_assignee_id,
            tracker_ids: HashMap::new(),
            status_ids: HashMap::new(),
            priority_ids: HashMap::new(),
            project_trackers: None,
            all_trackers: None,
            statuses: None,
            priorities: None,
        }
    }

    // =========================================================================
    // Tracker Mapping
    // =========================================================================

    /// Map a source tracker id to a target tracker id.
    ///
    /// Match order: exact name, case-insensitive name, keyword heuristic,
    /// first tracker of the project, first tracker system-wide. `None`
    /// only when the target has no trackers at all.
    pub async fn map_tracker(
        &mut self,
        source: &mut SourceClient,
        target: &TargetClient,
        source_id: u64,
    ) -> Option<u64> {
        if let Some(resolved) = self.tracker_ids.get(&source_id) {
            return *resolved;
        }

        let record = source.fetch_reference(ReferenceKind::Tracker, source_id).await;

        let mut resolved = {
            let candidates = self.project_tracker_list(target).await;
            resolve_name(&record.name, candidates, TRACKER_GROUPS)
                .or_else(|| candidates.first().map(|c| c.id))
        };

        // Project exposes no trackers; fall back to the system-wide list
        if resolved.is_none() {
            let all = self.all_tracker_list(target).await;
            resolved = all.first().map(|c| c.id);
        }

        log_resolution("tracker", &record, resolved);
        self.tracker_ids.insert(source_id, resolved);

        resolved
    }

    // =========================================================================
    // Status Mapping
    // =========================================================================

    /// Map a source status id to a target status id.
    ///
    /// Match order: exact name, case-insensitive name, keyword heuristic,
    /// the target's default status, first status in the list.
    pub async fn map_status(
        &mut self,
        source: &mut SourceClient,
        target: &TargetClient,
        source_id: u64,
    ) -> Option<u64> {
        if let Some(resolved) = self.status_ids.get(&source_id) {
            return *resolved;
        }

        let record = source.fetch_reference(ReferenceKind::Status, source_id).await;

        let resolved = {
            let candidates = self.status_list(target).await;
            resolve_name(&record.name, candidates, STATUS_GROUPS)
                .or_else(|| candidates.iter().find(|c| c.is_default).map(|c| c.id))
                .or_else(|| candidates.first().map(|c| c.id))
        };

        log_resolution("status", &record, resolved);
        self.status_ids.insert(source_id, resolved);

        resolved
    }

    // =========================================================================
    // Priority Mapping
    // =========================================================================

    /// Map a source priority id to a target priority id. Always resolves:
    /// the final fallback is the seeded normal-priority slot.
    pub async fn map_priority(
        &mut self,
        source: &mut SourceClient,
        target: &TargetClient,
        source_id: u64,
    ) -> Option<u64> {
        if let Some(resolved) = self.priority_ids.get(&source_id) {
            return *resolved;
        }

        let record = source.fetch_reference(ReferenceKind::Priority, source_id).await;

        let resolved = {
            let candidates = self.priority_list(target).await;
            resolve_name(&record.name, candidates, PRIORITY_GROUPS)
                .or_else(|| candidates.first().map(|c| c.id))
                .or(Some(FALLBACK_PRIORITY_ID))
        };

        log_resolution("priority", &record, resolved);
        self.priority_ids.insert(source_id, resolved);

        resolved
    }

    // =========================================================================
    // Category Mapping
    // =========================================================================

    /// Resolve a category by name in the target project, creating it on
    /// first sight.
    ///
    /// Deliberately uncached: the lookup runs before every create, so a
    /// category created for an earlier issue is found instead of
    /// duplicated. `None` leaves the issue uncategorized.
    pub async fn map_category(&self, target: &TargetClient, name: &str) -> Option<u64> {
        let existing = match target.categories(self.project_id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(
                    "could not list target categories: {}; leaving category unset",
                    e
                );
                return None;
            }
        };

        if let Some(category) = existing.iter().find(|c| c.name == name) {
            return Some(category.id);
        }

        match target.create_category(self.project_id, name).await {
            Ok(id) => {
                debug!("created target category {:?} (#{})", name, id);
                Some(id)
            }
            Err(e) => {
                warn!("could not create target category {:?}: {}", name, e);
                None
            }
        }
    }

    /// Assignment always lands on the configured fallback user; source
    /// accounts have no counterpart on the target side.
    pub fn map_assignee(&self) -> u64 {
        self.fallback_assignee_id
    }

    // =========================================================================
    // Target Vocabulary (lazy, fetched once per kind)
    // =========================================================================

    async fn project_tracker_list(&mut self, target: &TargetClient) -> &[Candidate] {
        if self.project_trackers.is_none() {
            let result = target.project_trackers(self.project_id).await;
            self.project_trackers = Some(fetch_list("project trackers", result));
        }
        self.project_trackers.as_deref().unwrap_or_default()
    }

    async fn all_tracker_list(&mut self, target: &TargetClient) -> &[Candidate] {
        if self.all_trackers.is_none() {
            let list = fetch_list("trackers", target.all_trackers().await);
            self.all_trackers = Some(list);
        }
        self.all_trackers.as_deref().unwrap_or_default()
    }

    async fn status_list(&mut self, target: &TargetClient) -> &[Candidate] {
        if self.statuses.is_none() {
            let list = fetch_list("issue statuses", target.statuses().await);
            self.statuses = Some(list);
        }
        self.statuses.as_deref().unwrap_or_default()
    }

    async fn priority_list(&mut self, target: &TargetClient) -> &[Candidate] {
        if self.priorities.is_none() {
            let list = fetch_list("issue priorities", target.priorities().await);
            self.priorities = Some(list);
        }
        self.priorities.as_deref().unwrap_or_default()
    }
}

/// Steps 1-3 of the resolution policy: exact name, case-insensitive name,
/// keyword heuristic.
pub(crate) fn resolve_name(
    source_name: &str,
    candidates: &[Candidate],
    groups: &[KeywordGroup],
) -> Option<u64> {
    if let Some(found) = candidates.iter().find(|c| c.name == source_name) {
        return Some(found.id);
    }

    let source_lower = source_name.to_lowercase();
    if let Some(found) = candidates.iter().find(|c| c.name.to_lowercase() == source_lower) {
        return Some(found.id);
    }

    keyword_match(source_name, candidates, groups)
}

/// An empty vocabulary list on error keeps mapping total; the fallback
/// chain takes over from there.
fn fetch_list(what: &str, result: ClientResult<Vec<Candidate>>) -> Vec<Candidate> {
    match result {
        Ok(list) => list,
        Err(e) => {
            warn!("could not list target {}: {}; falling back", what, e);
            Vec::new()
        }
    }
}

fn log_resolution(kind: &str, record: &Candidate, resolved: Option<u64>) {
    match resolved {
        Some(id) => debug!("{} {:?} (#{}) -> target #{}", kind, record.name, record.id, id),
        None => warn!(
            "{} {:?} (#{}) has no target counterpart; field will be omitted",
            kind, record.name, record.id
        ),
    }
}

/// Outcome counters for one transfer run.
///
/// `created` and `skipped` partition the fetched issue set under the
/// continue policy. The remaining counters summarize the best-effort
/// phases; their failures never change the run's outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Issues created on the target.
    pub created: usize,
    /// Source issues skipped because their create failed.
    pub skipped: usize,
    /// Parent links that were set.
    pub linked: usize,
    /// Attachments copied across.
    pub attachments: usize,
    /// Journal notes replayed.
    pub notes: usize,
}

pub mod models;

#[cfg(test)]
mod tests;

pub use models::attachment::Attachment;
pub use models::candidate::Candidate;
pub use models::issue::{IssueRef, SourceIssue};
pub use models::journal::Journal;
pub use models::new_issue::NewIssue;
pub use models::reference::ReferenceKind;

pub mod attachment;
pub mod candidate;
pub mod issue;
pub mod journal;
pub mod new_issue;
pub mod reference;

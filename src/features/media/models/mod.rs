mod issue;
mod submission;

pub use issue::{ExtractionDraft, IssueCategory, IssueRecord, Priority};
pub use submission::{MediaKind, MediaSubmission, ProcessOutcome};

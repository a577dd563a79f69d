mod submission;
mod verdict;

pub use submission::ReportSubmission;
pub use verdict::{ModerationVerdict, VerdictStatus};

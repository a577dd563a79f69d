use crate::modules::oracle::ImagePayload;

/// A report as submitted for moderation. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ReportSubmission {
    pub title: String,
    pub description: String,
    /// Images in submission order
    pub images: Vec<ImagePayload>,
}

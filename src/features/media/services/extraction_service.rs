use base64::prelude::*;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::media::models::{
    ExtractionDraft, IssueCategory, IssueRecord, MediaKind, MediaSubmission, ProcessOutcome,
};
use crate::features::moderation::models::ModerationVerdict;
use crate::modules::oracle::{complete_structured, ImagePayload, Oracle, Prompt};
use crate::shared::llm::LlmResponse;
use crate::shared::prompts::{
    render_extraction_prompt, render_static, DESCRIBE_SYSTEM, DESCRIBE_USER,
    EXTRACT_USER,
};

/// Words in the image description that mark the image as non-civic
const NON_CIVIC_INDICATORS: &[&str] = &[
    "person",
    "selfie",
    "face",
    "human",
    "group",
    "fun",
    "social media",
    "party",
    "animal not waste",
];

pub const NON_CIVIC_IMAGE_MESSAGE: &str = "This image does not appear to show waste or civic issue.";

/// Encode upload bytes, keeping the declared type when it is an image type.
/// Anything else is sent as JPEG.
fn image_payload(bytes: &[u8], content_type: Option<&str>) -> ImagePayload {
    let encoded = BASE64_STANDARD.encode(bytes);
    match content_type {
        Some(mime) if mime.starts_with("image/") => {
            ImagePayload::from_base64(format!("data:{};base64,{}", mime, encoded))
        }
        _ => ImagePayload::from_base64(encoded),
    }
}

/// Turns an uploaded image into an issue record in two oracle calls:
/// a free-text description used to reject non-civic images, then a
/// structured extraction.
pub struct IssueExtractionService {
    oracle: Arc<dyn Oracle>,
}

impl IssueExtractionService {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub async fn process(&self, submission: MediaSubmission) -> Result<ProcessOutcome> {
        match submission.kind {
            MediaKind::Video => {
                tracing::debug!("Video upload, skipping analysis");
                Ok(ProcessOutcome::Issue(IssueRecord::video_placeholder()))
            }
            MediaKind::Image => {
                let image = image_payload(&submission.bytes, submission.content_type.as_deref());
                self.process_image(image).await
            }
        }
    }

    async fn process_image(&self, image: ImagePayload) -> Result<ProcessOutcome> {
        let description = self.describe(&image).await?;
        tracing::info!("Image description: {}", description);

        if let Some(indicator) = non_civic_indicator(&description) {
            tracing::info!(indicator, "Image rejected as non-civic");
            return Ok(ProcessOutcome::Rejected(ModerationVerdict::spam(
                NON_CIVIC_IMAGE_MESSAGE,
            )));
        }

        let draft = self.extract(image).await?;
        if !draft.is_success() {
            tracing::warn!(
                "Issue extraction used fallback: {:?}",
                draft.llm_error_message
            );
        }

        let record = draft.into_record();
        tracing::info!(
            category = %record.issue_category,
            priority = ?record.priority,
            "Issue extracted"
        );

        Ok(ProcessOutcome::Issue(record))
    }

    /// Brief lowercased description of the image contents
    async fn describe(&self, image: &ImagePayload) -> Result<String> {
        let prompt = Prompt::user(render_static(DESCRIBE_USER)?)
            .with_system(render_static(DESCRIBE_SYSTEM)?)
            .with_image(image.clone());

        let answer = self.oracle.complete(&prompt).await?;
        Ok(answer.to_lowercase())
    }

    async fn extract(&self, image: ImagePayload) -> Result<ExtractionDraft> {
        let system = render_extraction_prompt(
            &IssueCategory::prompt_list(),
            &ExtractionDraft::json_schema_string(),
        )?;
        let prompt = Prompt::user(render_static(EXTRACT_USER)?)
            .with_system(system)
            .with_image(image);

        Ok(complete_structured(self.oracle.as_ref(), prompt).await?)
    }
}

fn non_civic_indicator(description: &str) -> Option<&'static str> {
    NON_CIVIC_INDICATORS
        .iter()
        .copied()
        .find(|word| description.contains(word))
}

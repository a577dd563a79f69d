use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::text_filter::looks_like_gibberish;
use crate::features::moderation::models::{ModerationVerdict, ReportSubmission};
use crate::modules::oracle::{Oracle, OracleError, Prompt};
use crate::shared::prompts::{
    render_relevance_prompt, render_static, TemplateError, IMAGE_CHECK_QUESTION,
    IMAGE_CHECK_SYSTEM,
};

pub const GIBBERISH_MESSAGE: &str = "Irrelevant or gibberish text detected";
pub const IRRELEVANT_TEXT_MESSAGE: &str = "Report looks irrelevant or invalid";
pub const UNRELATED_IMAGE_MESSAGE: &str = "Image seems unrelated to civic waste or issue";
pub const VALID_MESSAGE: &str = "Report is valid";

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Decision of one moderation stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Continue,
    Terminate(ModerationVerdict),
}

/// One step of the moderation pipeline.
#[async_trait]
pub trait ModerationStage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn evaluate(
        &self,
        submission: &ReportSubmission,
        oracle: &dyn Oracle,
    ) -> Result<StageOutcome, StageError>;
}

/// Stage 1: local heuristics on title and description. Never calls the oracle.
pub struct LocalTextFilterStage;

#[async_trait]
impl ModerationStage for LocalTextFilterStage {
    fn name(&self) -> &'static str {
        "local_text_filter"
    }

    async fn evaluate(
        &self,
        submission: &ReportSubmission,
        _oracle: &dyn Oracle,
    ) -> Result<StageOutcome, StageError> {
        if looks_like_gibberish(&submission.title) || looks_like_gibberish(&submission.description)
        {
            return Ok(StageOutcome::Terminate(ModerationVerdict::spam(
                GIBBERISH_MESSAGE,
            )));
        }
        Ok(StageOutcome::Continue)
    }
}

/// Stage 2: ask the oracle whether the text is a civic report.
///
/// Any answer containing "SPAM" is spam, so "NOT SPAM" is spam too.
pub struct TextRelevanceStage;

#[async_trait]
impl ModerationStage for TextRelevanceStage {
    fn name(&self) -> &'static str {
        "text_relevance"
    }

    async fn evaluate(
        &self,
        submission: &ReportSubmission,
        oracle: &dyn Oracle,
    ) -> Result<StageOutcome, StageError> {
        let prompt = render_relevance_prompt(&submission.title, &submission.description)?;
        let decision = oracle.complete(&Prompt::user(prompt)).await?;
        let decision = decision.trim().to_uppercase();

        tracing::debug!("Relevance decision: {}", decision);

        if decision.contains("SPAM") {
            return Ok(StageOutcome::Terminate(ModerationVerdict::spam(
                IRRELEVANT_TEXT_MESSAGE,
            )));
        }
        Ok(StageOutcome::Continue)
    }
}

/// Stage 3: yes/no relevance question per image, in submission order.
///
/// The first answer containing "no" ends the stage; later images are not sent.
pub struct ImageRelevanceStage;

#[async_trait]
impl ModerationStage for ImageRelevanceStage {
    fn name(&self) -> &'static str {
        "image_relevance"
    }

    async fn evaluate(
        &self,
        submission: &ReportSubmission,
        oracle: &dyn Oracle,
    ) -> Result<StageOutcome, StageError> {
        if submission.images.is_empty() {
            return Ok(StageOutcome::Continue);
        }

        let system = render_static(IMAGE_CHECK_SYSTEM)?;
        let question = render_static(IMAGE_CHECK_QUESTION)?;

        for (index, image) in submission.images.iter().enumerate() {
            let prompt = Prompt::user(question.clone())
                .with_system(system.clone())
                .with_image(image.clone());
            let answer = oracle.complete(&prompt).await?;
            let answer = answer.trim().to_lowercase();

            tracing::debug!("Image {} relevance answer: {}", index, answer);

            if answer.contains("no") {
                return Ok(StageOutcome::Terminate(ModerationVerdict::spam(
                    UNRELATED_IMAGE_MESSAGE,
                )));
            }
        }
        Ok(StageOutcome::Continue)
    }
}

/// Ordered moderation pipeline that stops at the first terminal stage
pub struct ModerationService {
    oracle: Arc<dyn Oracle>,
    stages: Vec<Box<dyn ModerationStage>>,
}

impl ModerationService {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self::with_stages(
            oracle,
            vec![
                Box::new(LocalTextFilterStage),
                Box::new(TextRelevanceStage),
                Box::new(ImageRelevanceStage),
            ],
        )
    }

    pub fn with_stages(oracle: Arc<dyn Oracle>, stages: Vec<Box<dyn ModerationStage>>) -> Self {
        Self { oracle, stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order. Stage failures become an `error` verdict.
    pub async fn moderate(&self, submission: &ReportSubmission) -> ModerationVerdict {
        for stage in &self.stages {
            match stage.evaluate(submission, self.oracle.as_ref()).await {
                Ok(StageOutcome::Continue) => {}
                Ok(StageOutcome::Terminate(verdict)) => {
                    tracing::info!(
                        stage = stage.name(),
                        status = %verdict.status,
                        "Moderation terminated: {}",
                        verdict.message
                    );
                    return verdict;
                }
                Err(e) => {
                    tracing::error!(stage = stage.name(), "Moderation stage failed: {}", e);
                    return ModerationVerdict::error(e.to_string());
                }
            }
        }

        tracing::info!(images = submission.images.len(), "Report passed moderation");
        ModerationVerdict::ok(VALID_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::moderation::models::VerdictStatus;
    use crate::modules::oracle::ImagePayload;
    use crate::shared::test_helpers::MockOracle;

    fn submission(title: &str, description: &str, images: usize) -> ReportSubmission {
        ReportSubmission {
            title: title.to_string(),
            description: description.to_string(),
            images: (0..images)
                .map(|i| ImagePayload::from_base64(format!("aW1hZ2U{}", i)))
                .collect(),
        }
    }

    fn valid_submission(images: usize) -> ReportSubmission {
        submission(
            "Overflowing garbage bin",
            "The bin near the bus stop has not been emptied for a week",
            images,
        )
    }

    #[test]
    fn test_default_stage_order() {
        let service = ModerationService::new(MockOracle::new().into_shared());
        assert_eq!(
            service.stage_names(),
            vec!["local_text_filter", "text_relevance", "image_relevance"]
        );
    }

    #[tokio::test]
    async fn test_gibberish_short_circuits_without_oracle_call() {
        let oracle = MockOracle::new();
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&submission("hi", "", 2)).await;

        assert_eq!(verdict, ModerationVerdict::spam(GIBBERISH_MESSAGE));
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gibberish_description_alone_is_spam() {
        let oracle = MockOracle::new();
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service
            .moderate(&submission("Broken traffic light downtown", "asdf asdf", 0))
            .await;

        assert_eq!(verdict.status, VerdictStatus::Spam);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_relevance_spam_skips_image_checks() {
        let oracle = MockOracle::new().with_response("SPAM");
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&valid_submission(3)).await;

        assert_eq!(verdict, ModerationVerdict::spam(IRRELEVANT_TEXT_MESSAGE));
        assert_eq!(oracle.call_count(), 1);
        assert!(oracle.was_called_with("Title: \"Overflowing garbage bin\""));
    }

    #[tokio::test]
    async fn test_not_spam_answer_still_counts_as_spam() {
        let oracle = MockOracle::new().with_response("not spam");
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&valid_submission(0)).await;

        assert_eq!(verdict.status, VerdictStatus::Spam);
    }

    #[tokio::test]
    async fn test_first_unrelated_image_stops_remaining_checks() {
        let oracle = MockOracle::new()
            .with_response("VALID")
            .with_response("YES")
            .with_response("No, this is a cat.")
            .with_response("YES");
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&valid_submission(4)).await;

        assert_eq!(verdict, ModerationVerdict::spam(UNRELATED_IMAGE_MESSAGE));
        // relevance + images 0 and 1; images 2 and 3 never sent
        assert_eq!(oracle.call_count(), 3);

        let calls = oracle.calls();
        assert_eq!(
            calls[1].image,
            Some(ImagePayload::from_base64("aW1hZ2U0"))
        );
        assert_eq!(
            calls[2].image,
            Some(ImagePayload::from_base64("aW1hZ2U1"))
        );
        assert!(calls[1].system.is_some());
    }

    #[tokio::test]
    async fn test_valid_report_with_images_is_ok() {
        let oracle = MockOracle::new()
            .with_response("VALID")
            .with_response("YES")
            .with_response("yes");
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&valid_submission(2)).await;

        assert_eq!(verdict, ModerationVerdict::ok(VALID_MESSAGE));
        assert_eq!(oracle.call_count(), 3);
    }

    #[tokio::test]
    async fn test_valid_report_without_images_makes_one_call() {
        let oracle = MockOracle::new().with_response("VALID");
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&valid_submission(0)).await;

        assert_eq!(verdict.status, VerdictStatus::Ok);
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_oracle_failure_becomes_error_verdict() {
        let oracle = MockOracle::new()
            .with_response("VALID")
            .with_failure("connection reset");
        let service = ModerationService::new(oracle.clone().into_shared());

        let verdict = service.moderate(&valid_submission(2)).await;

        assert_eq!(
            verdict,
            ModerationVerdict::error("Network error: connection reset")
        );
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_custom_stage_list_runs_in_order() {
        struct Reject;

        #[async_trait]
        impl ModerationStage for Reject {
            fn name(&self) -> &'static str {
                "reject"
            }

            async fn evaluate(
                &self,
                _submission: &ReportSubmission,
                _oracle: &dyn Oracle,
            ) -> Result<StageOutcome, StageError> {
                Ok(StageOutcome::Terminate(ModerationVerdict::spam("rejected")))
            }
        }

        let oracle = MockOracle::new();
        let service = ModerationService::with_stages(
            oracle.clone().into_shared(),
            vec![Box::new(Reject), Box::new(TextRelevanceStage)],
        );

        let verdict = service.moderate(&valid_submission(0)).await;

        assert_eq!(verdict, ModerationVerdict::spam("rejected"));
        assert_eq!(oracle.call_count(), 0);
    }
}

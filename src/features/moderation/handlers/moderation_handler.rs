use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::extractor::AppJson;
use crate::features::moderation::dtos::ModerateReportDto;
use crate::features::moderation::models::{ModerationVerdict, ReportSubmission};
use crate::features::moderation::services::ModerationService;

/// Moderate a report before submission
///
/// Runs the local gibberish filter, the text relevance check, then one
/// relevance check per image. Always answers 200; the verdict carries the
/// outcome, including oracle failures as `status: "error"`.
#[utoipa::path(
    post,
    path = "/moderate",
    tag = "moderation",
    request_body = ModerateReportDto,
    responses(
        (status = 200, description = "Moderation verdict", body = ModerationVerdict),
        (status = 400, description = "Malformed JSON body", body = crate::shared::types::ErrorBody)
    )
)]
pub async fn moderate_report(
    State(service): State<Arc<ModerationService>>,
    AppJson(dto): AppJson<ModerateReportDto>,
) -> Json<ModerationVerdict> {
    let submission = ReportSubmission::from(dto);
    Json(service.moderate(&submission).await)
}

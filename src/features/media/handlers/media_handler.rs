use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{
    ProcessMediaForm, DEFAULT_MEDIA_KIND, NO_FILE_MESSAGE, UNSUPPORTED_KIND_MESSAGE,
};
use crate::features::media::models::{MediaKind, MediaSubmission, ProcessOutcome};
use crate::features::media::services::IssueExtractionService;

/// Analyze an uploaded image and extract civic issue details
///
/// Accepts multipart/form-data with:
/// - `file`: The media file (required)
/// - `kind`: "image" or "video" (optional, defaults to "image")
///
/// Videos are not analyzed and get a placeholder record.
#[utoipa::path(
    post,
    path = "/process",
    tag = "media",
    request_body(
        content = ProcessMediaForm,
        content_type = "multipart/form-data",
        description = "Media upload with optional kind",
    ),
    responses(
        (status = 200, description = "Extracted issue, or a spam verdict for non-civic images", body = ProcessOutcome),
        (status = 400, description = "Missing file or unsupported kind", body = crate::shared::types::ErrorBody),
        (status = 500, description = "Oracle failure", body = crate::shared::types::ErrorBody)
    )
)]
pub async fn process_media(
    State(service): State<Arc<IssueExtractionService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessOutcome>> {
    debug!("Received request at /process");

    // A body that is not multipart carries no file
    let mut multipart = multipart.map_err(|e| {
        debug!("Multipart rejected: {}", e);
        AppError::BadRequest(NO_FILE_MESSAGE.to_string())
    })?;

    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            "kind" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read kind field: {}", e))
                })?;
                kind = Some(text);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let bytes = file_data.ok_or_else(|| AppError::BadRequest(NO_FILE_MESSAGE.to_string()))?;

    let kind = kind
        .as_deref()
        .unwrap_or(DEFAULT_MEDIA_KIND)
        .parse::<MediaKind>()
        .map_err(|e| {
            debug!("{}", e);
            AppError::Validation(UNSUPPORTED_KIND_MESSAGE.to_string())
        })?;

    let outcome = service
        .process(MediaSubmission {
            kind,
            bytes,
            content_type,
        })
        .await?;

    Ok(Json(outcome))
}

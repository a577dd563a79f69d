use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::extractor::AppJson;
use crate::features::chat::dtos::{ChatReplyDto, ChatRequestDto};
use crate::features::chat::services::{ChatOutcome, ChatService};

/// Ask the civic assistant a question
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "Assistant reply, or a prompt to enter a query", body = ChatReplyDto),
        (status = 400, description = "Malformed JSON body", body = crate::shared::types::ErrorBody),
        (status = 500, description = "Oracle failure, canned reply", body = ChatReplyDto)
    )
)]
pub async fn chat(
    State(service): State<Arc<ChatService>>,
    AppJson(dto): AppJson<ChatRequestDto>,
) -> (StatusCode, Json<ChatReplyDto>) {
    let outcome = service.respond(dto.message.as_deref().unwrap_or_default()).await;

    let status = match outcome {
        ChatOutcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };

    (
        status,
        Json(ChatReplyDto {
            reply: outcome.reply().to_string(),
        }),
    )
}

use utoipa::{Modify, OpenApi};

use crate::features::chat::{dtos as chat_dtos, handlers as chat_handlers};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers, models as media_models};
use crate::features::moderation::{
    dtos as moderation_dtos, handlers as moderation_handlers, models as moderation_models,
};
use crate::shared::types::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Chat
        chat_handlers::chat,
        // Media
        media_handlers::process_media,
        // Moderation
        moderation_handlers::moderate_report,
    ),
    components(
        schemas(
            ErrorBody,
            // Chat
            chat_dtos::ChatRequestDto,
            chat_dtos::ChatReplyDto,
            // Media
            media_dtos::ProcessMediaForm,
            media_models::IssueCategory,
            media_models::Priority,
            media_models::IssueRecord,
            media_models::ProcessOutcome,
            // Moderation
            moderation_dtos::ModerateReportDto,
            moderation_models::VerdictStatus,
            moderation_models::ModerationVerdict,
        )
    ),
    tags(
        (name = "chat", description = "Civic assistant chat"),
        (name = "media", description = "Issue extraction from uploaded media"),
        (name = "moderation", description = "Spam and relevance checks for report submissions"),
    ),
    info(
        title = "Civic Relay API",
        version = "0.1.0",
        description = "API documentation for Civic Relay",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

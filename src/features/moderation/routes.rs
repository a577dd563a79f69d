use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::moderation::handlers::moderate_report;
use crate::features::moderation::services::ModerationService;

/// Create routes for the moderation feature
///
/// `max_body_size` bounds the JSON body, which carries base64 images.
pub fn routes(service: Arc<ModerationService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/moderate",
            post(moderate_report).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(service)
}

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::media::handlers::process_media;
use crate::features::media::services::IssueExtractionService;

/// Create routes for the media feature
pub fn routes(service: Arc<IssueExtractionService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/process",
            // Leave room for multipart framing on top of the file itself
            post(process_media)
                .layer(DefaultBodyLimit::max(max_body_size.saturating_add(64 * 1024))),
        )
        .with_state(service)
}

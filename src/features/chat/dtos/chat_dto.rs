use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChatRequestDto {
    /// User question; missing or null counts as empty
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReplyDto {
    pub reply: String,
}

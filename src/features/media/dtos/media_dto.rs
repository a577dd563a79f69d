use serde::Deserialize;
use utoipa::ToSchema;

/// Multipart form for `/process` (OpenAPI documentation only)
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ProcessMediaForm {
    /// Media file to analyze
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// "image" (default) or "video"
    pub kind: Option<String>,
}

pub const DEFAULT_MEDIA_KIND: &str = "image";
pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const UNSUPPORTED_KIND_MESSAGE: &str = "Unsupported media kind";

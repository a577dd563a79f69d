use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::moderation::models::ReportSubmission;
use crate::modules::oracle::ImagePayload;

/// Request body for `/moderate`. Missing or null fields count as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ModerateReportDto {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Base64 encoded images, checked in order
    pub images: Option<Vec<String>>,
}

impl From<ModerateReportDto> for ReportSubmission {
    fn from(dto: ModerateReportDto) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            images: dto
                .images
                .unwrap_or_default()
                .into_iter()
                .map(ImagePayload::from_base64)
                .collect(),
        }
    }
}

use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

use super::IssueRecord;
use crate::features::moderation::models::ModerationVerdict;

/// Declared kind of an uploaded media blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("Unsupported media kind: {}", other)),
        }
    }
}

/// One uploaded file with its declared kind
#[derive(Debug, Clone)]
pub struct MediaSubmission {
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
    /// Content type reported by the upload, if any
    pub content_type: Option<String>,
}

/// Result of `/process`: extracted issue, or a rejection of the image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProcessOutcome {
    Issue(IssueRecord),
    Rejected(ModerationVerdict),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parse() {
        assert_eq!("image".parse::<MediaKind>(), Ok(MediaKind::Image));
        assert_eq!("video".parse::<MediaKind>(), Ok(MediaKind::Video));
        assert!("audio".parse::<MediaKind>().is_err());
        assert!("Image".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_rejected_outcome_serializes_as_verdict() {
        let outcome = ProcessOutcome::Rejected(ModerationVerdict::spam("nope"));
        assert_eq!(
            serde_json::to_value(outcome).unwrap(),
            serde_json::json!({"status": "spam", "message": "nope"})
        );
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Ok,
    Spam,
    Error,
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictStatus::Ok => write!(f, "ok"),
            VerdictStatus::Spam => write!(f, "spam"),
            VerdictStatus::Error => write!(f, "error"),
        }
    }
}

/// Outcome of a moderation or media relevance decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModerationVerdict {
    pub status: VerdictStatus,
    pub message: String,
}

impl ModerationVerdict {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Ok,
            message: message.into(),
        }
    }

    pub fn spam(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Spam,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Error,
            message: message.into(),
        }
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::llm::LlmResponse;

/// Closed set of civic issue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IssueCategory {
    Pothole,
    #[serde(rename = "Street Light")]
    StreetLight,
    #[serde(rename = "Garbage/Waste")]
    GarbageWaste,
    #[serde(rename = "Traffic Signal")]
    TrafficSignal,
    Sidewalk,
    #[serde(rename = "Water Issue")]
    WaterIssue,
    Other,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::Pothole,
        IssueCategory::StreetLight,
        IssueCategory::GarbageWaste,
        IssueCategory::TrafficSignal,
        IssueCategory::Sidewalk,
        IssueCategory::WaterIssue,
        IssueCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Pothole => "Pothole",
            IssueCategory::StreetLight => "Street Light",
            IssueCategory::GarbageWaste => "Garbage/Waste",
            IssueCategory::TrafficSignal => "Traffic Signal",
            IssueCategory::Sidewalk => "Sidewalk",
            IssueCategory::WaterIssue => "Water Issue",
            IssueCategory::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup by display name
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    /// Coerce any oracle output to an allowed category; unknown or missing is `Other`.
    pub fn normalize(label: Option<&str>) -> Self {
        label
            .and_then(Self::from_label)
            .unwrap_or(IssueCategory::Other)
    }

    pub fn priority(&self) -> Priority {
        match self {
            IssueCategory::Pothole | IssueCategory::TrafficSignal => Priority::High,
            _ => Priority::Medium,
        }
    }

    /// "Pothole, Street Light, ..." for prompts
    pub fn prompt_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// Issue metadata derived from an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IssueRecord {
    pub issue_title: String,
    pub issue_category: IssueCategory,
    pub detailed_description: String,
    pub priority: Priority,
}

impl IssueRecord {
    pub fn new(title: String, category: IssueCategory, description: String) -> Self {
        Self {
            issue_title: title,
            issue_category: category,
            detailed_description: description,
            priority: category.priority(),
        }
    }

    /// Placeholder for video uploads, which are not analyzed
    pub fn video_placeholder() -> Self {
        Self::new(
            "Video Report".to_string(),
            IssueCategory::Other,
            "Video uploaded (not analyzed).".to_string(),
        )
    }
}

fn default_true() -> bool {
    true
}

/// Raw structured answer from the extraction prompt
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[schemars(title = "IssueExtraction")]
pub struct ExtractionDraft {
    #[schemars(description = "Short title of the civic issue shown in the image")]
    pub issue_title: Option<String>,

    #[schemars(
        description = "One of: Pothole, Street Light, Garbage/Waste, Traffic Signal, Sidewalk, Water Issue, Other"
    )]
    pub issue_category: Option<String>,

    #[schemars(description = "Detailed description of the issue")]
    pub detailed_description: Option<String>,

    #[serde(default = "default_true")]
    #[schemars(skip)]
    pub is_llm_success: bool,

    #[serde(skip)]
    #[schemars(skip)]
    pub llm_error_message: Option<String>,
}

impl LlmResponse for ExtractionDraft {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

impl ExtractionDraft {
    /// Apply defaults, coerce the category and derive priority
    pub fn into_record(self) -> IssueRecord {
        let category = IssueCategory::normalize(self.issue_category.as_deref());
        IssueRecord::new(
            self.issue_title.unwrap_or_else(|| "Untitled".to_string()),
            category,
            self.detailed_description.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::parse_with_fallback;

    #[test]
    fn test_every_allowed_label_round_trips() {
        for category in IssueCategory::ALL {
            assert_eq!(IssueCategory::from_label(category.as_str()), Some(category));
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.as_str());
        }
    }

    #[test]
    fn test_unknown_categories_normalize_to_other() {
        for label in ["Graffiti", "pothole", "Street light", "", " Pothole"] {
            assert_eq!(IssueCategory::normalize(Some(label)), IssueCategory::Other);
        }
        assert_eq!(IssueCategory::normalize(None), IssueCategory::Other);
    }

    #[test]
    fn test_priority_mapping() {
        for category in IssueCategory::ALL {
            let expected = match category {
                IssueCategory::Pothole | IssueCategory::TrafficSignal => Priority::High,
                _ => Priority::Medium,
            };
            assert_eq!(category.priority(), expected, "{}", category);
        }
    }

    #[test]
    fn test_video_placeholder() {
        let json = serde_json::to_value(IssueRecord::video_placeholder()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "issue_title": "Video Report",
                "issue_category": "Other",
                "detailed_description": "Video uploaded (not analyzed).",
                "priority": "medium"
            })
        );
    }

    #[test]
    fn test_malformed_answer_yields_default_record() {
        let draft: ExtractionDraft = parse_with_fallback("Sorry, I cannot help with that.");
        assert!(!draft.is_success());

        let record = draft.into_record();
        assert_eq!(
            record,
            IssueRecord {
                issue_title: "Untitled".to_string(),
                issue_category: IssueCategory::Other,
                detailed_description: String::new(),
                priority: Priority::Medium,
            }
        );
    }

    #[test]
    fn test_draft_with_valid_category() {
        let draft: ExtractionDraft = parse_with_fallback(
            r#"{"issue_title": "Deep pothole", "issue_category": "Pothole", "detailed_description": "Hole in the left lane"}"#,
        );
        assert!(draft.is_success());

        let record = draft.into_record();
        assert_eq!(record.issue_category, IssueCategory::Pothole);
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.issue_title, "Deep pothole");
    }

    #[test]
    fn test_draft_missing_fields_take_defaults() {
        let draft: ExtractionDraft = parse_with_fallback(r#"{"issue_category": "Flooding"}"#);
        assert!(draft.is_success());

        let record = draft.into_record();
        assert_eq!(record.issue_title, "Untitled");
        assert_eq!(record.issue_category, IssueCategory::Other);
        assert_eq!(record.detailed_description, "");
        assert_eq!(record.priority, Priority::Medium);
    }

    #[test]
    fn test_schema_prompt_hides_internal_fields() {
        let schema = ExtractionDraft::json_schema_string();
        assert!(schema.contains("issue_category"));
        assert!(!schema.contains("is_llm_success"));
        assert!(!schema.contains("llm_error_message"));
    }
}

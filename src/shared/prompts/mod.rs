//! Prompt template management module.
//!
//! Templates live in `templates/prompts/` and use Jinja2 syntax.
//!
//! # Usage
//!
//! ```ignore
//! use crate::shared::prompts::render_relevance_prompt;
//!
//! let prompt = render_relevance_prompt("Overflowing bin", "Next to the bus stop")?;
//! ```

pub mod engine;

pub use engine::{render_static, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

use engine::{render_template, render_template_simple};

pub const CHAT_SYSTEM: &str = "chat/system.jinja";
pub const IMAGE_CHECK_SYSTEM: &str = "moderation/image_system.jinja";
pub const IMAGE_CHECK_QUESTION: &str = "moderation/image_question.jinja";
pub const DESCRIBE_SYSTEM: &str = "media/describe_system.jinja";
pub const DESCRIBE_USER: &str = "media/describe_user.jinja";
pub const EXTRACT_USER: &str = "media/extract_user.jinja";

/// Render the text-relevance classification prompt for a report.
pub fn render_relevance_prompt(title: &str, description: &str) -> Result<String, TemplateError> {
    let mut ctx = HashMap::new();
    ctx.insert("title", title);
    ctx.insert("description", description);

    render_template_simple("moderation/relevance.jinja", &ctx)
}

/// Render the extraction system prompt.
///
/// # Arguments
/// * `category_list` - Comma separated allowed categories
/// * `json_schema` - JSON schema string for the expected output
pub fn render_extraction_prompt(
    category_list: &str,
    json_schema: &str,
) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("category_list", Value::from(category_list));
    ctx.insert("json_schema", Value::from(json_schema));

    render_template("media/extract_system.jinja", &ctx)
}

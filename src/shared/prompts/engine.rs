//! Template engine for oracle prompts using Jinja2 syntax.
//!
//! Templates are compiled into the binary from `templates/prompts/` so a
//! deployment never depends on the working directory.

use minijinja::{AutoEscape, Environment, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

macro_rules! embedded {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!("../../../templates/prompts/", $name)),
        )
    };
}

/// Every prompt template shipped with the service
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    embedded!("chat/system.jinja"),
    embedded!("moderation/relevance.jinja"),
    embedded!("moderation/image_system.jinja"),
    embedded!("moderation/image_question.jinja"),
    embedded!("media/describe_system.jinja"),
    embedded!("media/describe_user.jinja"),
    embedded!("media/extract_system.jinja"),
    embedded!("media/extract_user.jinja"),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Prompts are plain text; user input must reach the oracle verbatim
    env.set_auto_escape_callback(|_| AutoEscape::None);

    for (name, source) in EMBEDDED_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// `template_name` is relative to `templates/prompts/`, e.g. `"chat/system.jinja"`.
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    template
        .render(render_ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Render a template that takes no variables.
pub fn render_static(template_name: &str) -> Result<String, TemplateError> {
    render_template(template_name, &HashMap::new())
}

/// Render a template with a string-only context.
pub fn render_template_simple(
    template_name: &str,
    ctx: &HashMap<&str, &str>,
) -> Result<String, TemplateError> {
    let value_ctx: HashMap<&str, Value> = ctx.iter().map(|(k, v)| (*k, Value::from(*v))).collect();

    render_template(template_name, &value_ctx)
}

//! Model gateway
//!
//! Every call site that needs the completion provider goes through the
//! [`Oracle`] capability, so pipelines can be exercised against a test double.

mod error;
mod openai_client;
mod prompt;

pub use error::{OracleError, Result};
pub use openai_client::OpenAiOracle;
pub use prompt::{ImagePayload, Prompt};

use async_trait::async_trait;

use crate::shared::llm::{parse_with_fallback, LlmResponse};

/// Completion capability: one prompt in, raw answer text out.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}

/// Run a structured prompt and decode the answer, degrading to `T::default()`
/// (marked as fallback) when the answer is not usable JSON.
///
/// Transport errors still propagate.
pub async fn complete_structured<T>(oracle: &dyn Oracle, prompt: Prompt) -> Result<T>
where
    T: LlmResponse,
{
    let prompt = prompt.structured();
    let raw = oracle.complete(&prompt).await?;

    tracing::debug!(
        "Raw structured answer (first 500 chars): {}",
        raw.chars().take(500).collect::<String>()
    );

    Ok(parse_with_fallback(&raw))
}

use std::sync::Arc;

use crate::modules::oracle::{Oracle, Prompt};
use crate::shared::prompts::{render_static, CHAT_SYSTEM};

pub const EMPTY_QUERY_REPLY: &str = "⚠️ Please enter a valid query.";
pub const SERVER_ERROR_REPLY: &str = "❌ Server error, please try again later.";

/// Reply produced by the chat assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Answered(String),
    /// Input was empty; no oracle call was made
    EmptyQuery,
    Failed,
}

impl ChatOutcome {
    pub fn reply(&self) -> &str {
        match self {
            ChatOutcome::Answered(text) => text,
            ChatOutcome::EmptyQuery => EMPTY_QUERY_REPLY,
            ChatOutcome::Failed => SERVER_ERROR_REPLY,
        }
    }
}

/// Civic assistant persona in front of the oracle
pub struct ChatService {
    oracle: Arc<dyn Oracle>,
}

impl ChatService {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub async fn respond(&self, message: &str) -> ChatOutcome {
        if message.is_empty() {
            return ChatOutcome::EmptyQuery;
        }

        let system = match render_static(CHAT_SYSTEM) {
            Ok(system) => system,
            Err(e) => {
                tracing::error!("Chat persona unavailable: {}", e);
                return ChatOutcome::Failed;
            }
        };

        match self
            .oracle
            .complete(&Prompt::user(message).with_system(system))
            .await
        {
            Ok(reply) => ChatOutcome::Answered(reply),
            Err(e) => {
                tracing::error!("Chatbot error: {}", e);
                ChatOutcome::Failed
            }
        }
    }
}

#![cfg(test)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::modules::oracle::{Oracle, OracleError, Prompt, Result};

/// Canned answer for one oracle call
enum MockAnswer {
    Text(String),
    Failure(String),
}

/// Oracle double that replays queued answers and records every prompt.
///
/// Calls past the end of the queue answer with "Mock oracle response".
#[derive(Clone, Default)]
pub struct MockOracle {
    answers: Arc<Mutex<VecDeque<MockAnswer>>>,
    calls: Arc<Mutex<Vec<Prompt>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(MockAnswer::Text(response.into()));
        self
    }

    /// Queue a network failure
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(MockAnswer::Failure(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<Prompt> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether any recorded prompt's user text contains `text`
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.user.contains(text))
    }

    pub fn into_shared(self) -> Arc<dyn Oracle> {
        Arc::new(self)
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.clone());

        match self.answers.lock().unwrap().pop_front() {
            Some(MockAnswer::Text(text)) => Ok(text),
            Some(MockAnswer::Failure(message)) => Err(OracleError::Network(message)),
            None => Ok("Mock oracle response".to_string()),
        }
    }
}

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{OracleError, Result};
use super::prompt::Prompt;
use super::Oracle;
use crate::core::config::OracleConfig;

/// Oracle backed by the OpenAI chat completions endpoint
pub struct OpenAiOracle {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("CivicRelay/0.1 (civic-issue-portal)")
            .build()
            .map_err(|e| OracleError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    fn build_body<'a>(&'a self, prompt: &Prompt) -> CompletionBody<'a> {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = &prompt.system {
            messages.push(WireMessage {
                role: "system",
                content: WireContent::Text(system.clone()),
            });
        }

        let user_content = match &prompt.image {
            Some(image) => WireContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.user.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.data_url(),
                    },
                },
            ]),
            None => WireContent::Text(prompt.user.clone()),
        };
        messages.push(WireMessage {
            role: "user",
            content: user_content,
        });

        CompletionBody {
            model: &self.model,
            messages,
            response_format: prompt.structured.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| OracleError::Config("OPENAI_API_KEY not set".into()))?;

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&self.build_body(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Oracle request failed");
                OracleError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Oracle API error");
            return Err(OracleError::Api(format!(
                "status {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Parse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OracleError::Api("No response content from oracle".into()))?;

        debug!(
            model = %self.model,
            structured = prompt.structured,
            has_image = prompt.image.is_some(),
            duration_ms = start.elapsed().as_millis(),
            "Oracle completion"
        );

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: WireContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::oracle::ImagePayload;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn config(base_url: &str, api_key: Option<&str>) -> OracleConfig {
        OracleConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    /// Serve a fake provider on an ephemeral port and return its base URL
    async fn spawn_provider(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_text_prompt_serializes_plain_content() {
        let oracle = OpenAiOracle::new(&config("http://unused", Some("k"))).unwrap();
        let body = serde_json::to_value(oracle.build_body(&Prompt::user("hello"))).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_image_prompt_serializes_content_parts() {
        let oracle = OpenAiOracle::new(&config("http://unused", Some("k"))).unwrap();
        let prompt = Prompt::user("Describe this image briefly.")
            .with_system("You are an image verifier for civic waste reports.")
            .with_image(ImagePayload::from_base64("QUJD"))
            .structured();
        let body = serde_json::to_value(oracle.build_body(&prompt)).unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"][0]["type"], "text");
        assert_eq!(body["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,QUJD"
        );
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_at_call_time() {
        let oracle = OpenAiOracle::new(&config("http://127.0.0.1:9", None)).unwrap();
        let err = oracle.complete(&Prompt::user("hi")).await.unwrap_err();
        assert!(matches!(err, OracleError::Config(_)));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let router = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                assert_eq!(body["model"], "gpt-4o-mini");
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "VALID"}}]
                }))
            }),
        );
        let base_url = spawn_provider(router).await;

        let oracle = OpenAiOracle::new(&config(&base_url, Some("test-key"))).unwrap();
        let answer = oracle.complete(&Prompt::user("classify")).await.unwrap();
        assert_eq!(answer, "VALID");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    axum::http::StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "bad key"}})),
                )
            }),
        );
        let base_url = spawn_provider(router).await;

        let oracle = OpenAiOracle::new(&config(&base_url, Some("wrong"))).unwrap();
        let err = oracle.complete(&Prompt::user("hi")).await.unwrap_err();
        match err {
            OracleError::Api(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_api_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base_url = spawn_provider(router).await;

        let oracle = OpenAiOracle::new(&config(&base_url, Some("k"))).unwrap();
        let err = oracle.complete(&Prompt::user("hi")).await.unwrap_err();
        assert!(matches!(err, OracleError::Api(_)));
    }
}

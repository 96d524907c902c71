//! OpenAI-compatible LLM client.
//!
//! Used for the single ToC repair request per document. Works with any
//! endpoint exposing `/v1/chat/completions`.

use crate::config::LlmConfig;
use crate::error::{OutlineError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Message role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for chat completion.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

/// Response from chat completion.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI-compatible LLM client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    ///
    /// Every request is bounded by `config.timeout_secs`; a stalled
    /// endpoint surfaces as [`OutlineError::Http`].
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Model this client talks to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the API endpoint URL.
    fn endpoint(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/v1/chat/completions", base)
    }

    /// Send a chat completion request and return the first choice's text.
    pub async fn chat(&self, messages: &[Message]) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, messages = messages.len(), "sending chat completion");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(OutlineError::LlmApi(format!(
                    "API error ({}): {}",
                    status, api_error.error.message
                )));
            }
            return Err(OutlineError::LlmApi(format!(
                "Request failed ({}): {}",
                status, body
            )));
        }

        parse_completion(&body)
    }

    /// Convenience method: single user message with optional system prompt.
    pub async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(Message::system(sys));
        }
        messages.push(Message::user(user));

        self.chat(&messages).await
    }

    /// Test connectivity to the API.
    pub async fn test_connection(&self) -> Result<()> {
        let response = self
            .complete(None, "Say 'hello' and nothing else.")
            .await?;

        if response.to_lowercase().contains("hello") {
            Ok(())
        } else {
            Err(OutlineError::LlmApi(format!(
                "Unexpected response: {}",
                response
            )))
        }
    }
}

fn parse_completion(body: &str) -> Result<String> {
    let completion: ChatCompletionResponse = serde_json::from_str(body)?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| OutlineError::LlmApi("No content in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let sys = Message::system("You are helpful.");
        let user = Message::user("Hello!");

        assert_eq!(sys.role, Role::System);
        assert_eq!(user.role, Role::User);
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"role":"user","content":"Hello!"}"#
        );
    }

    #[test]
    fn test_endpoint_construction() {
        let config = LlmConfig {
            api_base: "https://api.example.com/".to_string(),
            api_key: "test".to_string(),
            model: "gpt-4".to_string(),
            ..Default::default()
        };
        let client = LlmClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4");
    }

    #[test]
    fn test_stalled_endpoint_times_out() {
        // Accepts the connection but never answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let config = LlmConfig {
            api_base: format!("http://{}", addr),
            api_key: "test".to_string(),
            model: "gpt-4".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = LlmClient::new(config).unwrap();

        let start = std::time::Instant::now();
        let result = tokio_test::block_on(client.complete(None, "hello"));
        assert!(matches!(result, Err(OutlineError::Http(_))));
        assert!(start.elapsed() < Duration::from_secs(10));
        drop(listener);
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"1 Safety 4"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "1 Safety 4");

        assert!(parse_completion(r#"{"choices":[]}"#).is_err());
        assert!(parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#).is_err());
        assert!(parse_completion("not json").is_err());
    }
}

//! Chat client for the external language model service.
//!
//! Speaks the OpenAI chat-completions protocol. The credential and model
//! come from [`LlmConfig`] handed in at construction; nothing here reads
//! process-wide state.

use async_trait::async_trait;
use common::config::LlmConfig;
use common::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A model that completes a (system, user) message pair into text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the model's response text for the given instruction and input.
    async fn complete(&self, system: &str, user: &str) -> AppResult<String>;
}

/// [`ChatModel`] backed by an OpenAI-compatible HTTP API.
pub struct OpenAiChat {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiChat {
    /// Creates a client for the configured endpoint.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, system: &str, user: &str) -> AppResult<String> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: system.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::LlmService(format!("HTTP {status}: {detail}")));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmService(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::LlmService("response contained no choices".into()))
    }
}

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// A single chat turn.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_matches_chat_completions_schema() {
        let body = ChatRequest {
            model: "gpt-4".into(),
            messages: vec![ChatMessage {
                role: "system".into(),
                content: "do the thing".into(),
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "do the thing");
    }

    #[test]
    fn response_content_is_extracted() {
        let raw = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "users, orders" } }
            ]
        });
        let parsed: ChatResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "users, orders");
    }
}

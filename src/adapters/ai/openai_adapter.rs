//! OpenAI-compatible backend adapter.
//!
//! Works against the OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `ModelPort`; enforces the configured timeout on every call.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{ClassifyError, Prompt};
use crate::ports::ModelPort;

/// Recognized backend options: which model, how long to wait, how much
/// sampling randomness.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Model name (e.g., "gpt-4o-mini", "llama3.2").
    pub model: String,
    /// Max wall-clock duration per call.
    pub timeout: Duration,
    /// Sampling temperature, 0–1.
    pub temperature: f32,
}

/// OpenAI-compatible backend adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    config: BackendConfig,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Chat-completions endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `config` - Model, timeout and temperature
    pub fn new(api_url: String, api_key: String, config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            config,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClassifyError {
        if e.is_timeout() {
            ClassifyError::Timeout(self.config.timeout)
        } else {
            ClassifyError::Transport(format!("HTTP request failed: {}", e))
        }
    }
}

/// Chat-completions request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat-completions response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

#[async_trait::async_trait]
impl ModelPort for OpenAiAdapter {
    async fn complete(&self, prompt: &Prompt) -> Result<String, ClassifyError> {
        debug!(
            model = %self.config.model,
            user_len = prompt.user.len(),
            "sending instruction to backend"
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .timeout(self.config.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("backend rate limited the request");
            return Err(ClassifyError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "backend API returned error");
            return Err(ClassifyError::Transport(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Transport(format!("unexpected response body: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassifyError::Transport("no response choices returned".to_string()))?;

        debug!(raw_len = content.len(), "received backend response");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "classify this".to_string(),
            }],
            temperature: 0.2,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_chat_response_parses() {
        let body = r#"{"choices":[{"message":{"content":"{\"L1\":\"IT Services\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content,
            r#"{"L1":"IT Services"}"#
        );
    }
}

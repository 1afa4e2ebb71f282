use std::time::Duration;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::Provider;
use async_trait::async_trait;

/// DeepSeek client for the OpenAI-compatible chat completions API
#[derive(Debug)]
pub struct DeepSeek {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,

    /// Whether to stream the response
    stream: bool,

    /// Per-request deadline, not part of the wire format
    #[serde(skip_serializing)]
    timeout: Option<Duration>,
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// The generated choices
    pub choices: Vec<ChatChoice>,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

/// Individual choice in a chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
    /// Why generation stopped
    pub finish_reason: Option<String>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            stream: false,
            timeout: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the system prompt (prepended as a system-role message)
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.messages.insert(0, ChatMessage {
            role: "system".to_string(),
            content: system.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of output tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The concatenated user-visible content, for logging and mocks
    pub fn user_content(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DeepSeek {
    /// Create a new DeepSeek client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Complete a chat request
    pub async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            "https://api.deepseek.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        };

        let mut builder = self.client.post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(request.timeout.map(|t| t.as_secs()).unwrap_or(0))
            } else {
                ProviderError::RequestFailed(format!("Failed to send request to DeepSeek API: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepSeek API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response = response.json::<ChatResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepSeek API response: {}", e)))?;

        Ok(chat_response)
    }

    /// Extract text from a chat completion response
    pub fn extract_text_from_response(response: &ChatResponse) -> String {
        response.choices.first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for DeepSeek {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        DeepSeek::complete(self, request).await
    }

    fn extract_text(response: &ChatResponse) -> String {
        Self::extract_text_from_response(response)
    }
}

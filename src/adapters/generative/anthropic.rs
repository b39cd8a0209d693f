//! Anthropic Messages API implementation of the generative port.
//!
//! Single-shot, non-streaming calls. The API key is resolved once at
//! construction (config value or `ANTHROPIC_API_KEY`) and the request
//! timeout is enforced by the HTTP client, so a hung service degrades into
//! the same "unavailable" outcome as any other transport failure.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::domain::models::GenerativeConfig;
use crate::domain::ports::{GenerationRequest, GenerativeClient, GenerativeError};

const API_VERSION: &str = "2023-06-01";

/// Message role in the Messages API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Request body for the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    temperature: f64,
}

/// Content block in a response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Response body from the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Anthropic-backed generative client.
pub struct AnthropicGenerativeClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

impl AnthropicGenerativeClient {
    /// Build a client from configuration.
    ///
    /// The key is taken from config, falling back to the
    /// `ANTHROPIC_API_KEY` environment variable. Absence of a key is not an
    /// error here; the client simply reports itself unconfigured.
    pub fn new(config: &GenerativeConfig) -> Result<Self, GenerativeError> {
        let api_key = if config.enabled {
            config
                .api_key
                .clone()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
        } else {
            None
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerativeError::Transport(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            client,
        })
    }
}

#[async_trait]
impl GenerativeClient for AnthropicGenerativeClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: GenerationRequest) -> Result<String, GenerativeError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(GenerativeError::MissingCredentials)?;

        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            system: request.system,
            messages: vec![Message {
                role: MessageRole::User,
                content: request.prompt,
            }],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerativeError::Timeout
                } else {
                    GenerativeError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerativeError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenerativeError::Transport(e.to_string()))?;

        let text = result
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(GenerativeError::EmptyCompletion);
        }

        Ok(text)
    }
}

//! Anthropic messages provider.
//!
//! API: https://docs.anthropic.com/en/api/messages
//!
//! The whole prompt (system instructions followed by the user text) travels
//! inline in a single user message.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use crate::types::{build_http_client, ClientOptions, ProviderType};
use serde::{Deserialize, Serialize};
use vertical_core::config::DEFAULT_ANTHROPIC_VERSION;
use vertical_core::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: String,
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Token budget when the request does not carry one.
const DEFAULT_MAX_TOKENS: u32 = 512;

/// Anthropic-style LLM client.
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    api_version: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a client from construction options.
    pub fn new(options: ClientOptions) -> AppResult<Self> {
        let base_url = options
            .endpoint
            .unwrap_or_else(|| ProviderType::Claude.default_endpoint().to_string());
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key,
            api_version: options
                .api_version
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_VERSION.to_string()),
            client: build_http_client(options.timeout)?,
        })
    }

    fn to_messages_request(&self, request: &LlmRequest) -> MessagesRequest {
        MessagesRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: vec![Message {
                role: "user",
                content: request.inline_prompt(),
            }],
        }
    }

    fn convert_response(&self, response: MessagesResponse) -> AppResult<LlmResponse> {
        let content = response
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| AppError::Llm("Anthropic returned no text content".to_string()))?;

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.input_tokens, u.output_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: response.model,
            usage,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for AnthropicClient {
    fn provider_name(&self) -> &str {
        "claude"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!(model = %request.model, "Sending completion request to Anthropic");
        tracing::debug!("Request: {:?}", request);

        let body = self.to_messages_request(request);
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Llm(format!("Anthropic request timed out: {}", e))
                } else {
                    AppError::Llm(format!("Failed to send request to Anthropic: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::Llm(format!(
                "Anthropic API error ({}): {}",
                status, message
            )));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Anthropic response: {}", e)))?;

        tracing::info!("Received completion from Anthropic");
        tracing::debug!("Response: {:?}", messages_response);

        self.convert_response(messages_response)
    }
}

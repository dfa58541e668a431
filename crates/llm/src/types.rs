//! Provider selection and client construction options.

use std::time::Duration;

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    /// OpenAI-style chat completions
    OpenAI,
    /// Anthropic-style messages API
    Claude,
}

impl ProviderType {
    /// Parse provider type from a provider or model-choice string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt-4" | "gpt4" | "gpt" => Some(Self::OpenAI),
            "claude" | "anthropic" => Some(Self::Claude),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Claude => "claude",
        }
    }

    /// Default API base URL.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com",
            Self::Claude => "https://api.anthropic.com",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options used to construct a provider client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API key sent with every request
    pub api_key: String,

    /// Base URL override (defaults to the provider's public endpoint)
    pub endpoint: Option<String>,

    /// Protocol version header (Anthropic only)
    pub api_version: Option<String>,

    /// Per-call timeout; expiry surfaces as a provider-call failure
    pub timeout: Duration,
}

impl ClientOptions {
    /// Create options with a key and timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            api_version: None,
            timeout,
        }
    }

    /// Set a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the protocol version header.
    pub fn with_api_version(mut self, api_version: Option<String>) -> Self {
        self.api_version = api_version;
        self
    }
}

/// Build the shared HTTP client for a provider.
///
/// Proxy settings from the process environment are ignored.
pub(crate) fn build_http_client(timeout: Duration) -> vertical_core::AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .map_err(|e| vertical_core::AppError::Config(format!("Failed to build HTTP client: {}", e)))
}

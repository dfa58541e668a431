//! LLM provider factory.
//!
//! Creates the client implementation for a provider type. Secrets are
//! resolved by the caller and passed in through [`ClientOptions`].

use crate::client::LlmClient;
use crate::providers::{AnthropicClient, OpenAiClient};
use crate::types::{ClientOptions, ProviderType};
use std::sync::Arc;
use vertical_core::{AppError, AppResult};

/// Create an LLM client for the given provider.
///
/// # Arguments
/// * `provider` - Which backend to talk to
/// * `options` - API key, endpoint override, version header and timeout
///
/// # Errors
/// Returns `AppError::Config` if the API key is blank or the HTTP client
/// cannot be built.
pub fn create_client(
    provider: ProviderType,
    options: ClientOptions,
) -> AppResult<Arc<dyn LlmClient>> {
    if options.api_key.trim().is_empty() {
        return Err(AppError::Config(format!(
            "{} provider requires API key",
            provider
        )));
    }

    tracing::debug!(provider = %provider, "Creating LLM client");

    match provider {
        ProviderType::OpenAI => Ok(Arc::new(OpenAiClient::new(options)?)),
        ProviderType::Claude => Ok(Arc::new(AnthropicClient::new(options)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn options(key: &str) -> ClientOptions {
        ClientOptions::new(key, Duration::from_secs(5))
    }

    #[test]
    fn test_create_openai_client() {
        let client = create_client(ProviderType::OpenAI, options("sk-test")).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_create_claude_with_custom_endpoint() {
        let opts = options("sk-ant").with_endpoint(Some("http://localhost:8080".to_string()));
        let client = create_client(ProviderType::Claude, opts).unwrap();
        assert_eq!(client.provider_name(), "claude");
    }

    #[test]
    fn test_blank_api_key_rejected() {
        match create_client(ProviderType::Claude, options("  ")) {
            Err(err) => assert!(err.to_string().contains("claude provider requires API key")),
            Ok(_) => panic!("Expected error for Claude without API key"),
        }
    }
}

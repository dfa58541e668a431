//! LLM integration crate for the vertical content generator.
//!
//! This crate provides a provider-agnostic abstraction for text completions.
//! Every provider is reached through the same [`LlmClient`] trait, so the
//! idea pipeline never knows which wire format it is talking to.
//!
//! # Providers
//! - **OpenAI**: chat-completions API
//! - **Anthropic**: messages API
//! - **Mock**: scripted responder for tests
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use vertical_llm::{create_client, ClientOptions, LlmRequest, ProviderType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::new("sk-...", Duration::from_secs(60));
//! let client = create_client(ProviderType::OpenAI, options)?;
//! let request = LlmRequest::new("Summer running campaign", "gpt-4")
//!     .with_system("You are a creative strategist.");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{AnthropicClient, MockClient, OpenAiClient};
pub use types::{ClientOptions, ProviderType};

//! LLM provider implementations.

pub mod anthropic;
pub mod mock;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use mock::MockClient;
pub use openai::OpenAiClient;

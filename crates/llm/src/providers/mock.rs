//! Scripted LLM client for tests.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::Mutex;
use vertical_core::{AppError, AppResult};

type Responder = Box<dyn Fn(&LlmRequest) -> AppResult<String> + Send + Sync>;

/// Mock provider for tests.
///
/// Every request is recorded, then answered by a responder closure, so tests
/// can both script completions and count how many calls a pipeline made.
pub struct MockClient {
    name: String,
    responder: Responder,
    calls: Mutex<Vec<LlmRequest>>,
}

impl MockClient {
    /// Create a mock that answers every request with the responder's output.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&LlmRequest) -> AppResult<String> + Send + Sync + 'static,
    {
        Self {
            name: "mock".to_string(),
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same text.
    pub fn fixed(content: impl Into<String>) -> Self {
        let content = content.into();
        Self::new(move |_| Ok(content.clone()))
    }

    /// Create a mock whose every call fails with a provider error.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(AppError::Llm(message.clone())))
    }

    /// Override the reported provider name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of completion calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Snapshot of every request received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        let content = (self.responder)(request)?;
        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}

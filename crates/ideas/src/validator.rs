//! Relevance validator.
//!
//! Asks a model whether a piece of text fits an industry. The check is a
//! quality heuristic: when it cannot be answered the text is treated as
//! relevant.

use crate::types::Industry;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use vertical_core::AppError;
use vertical_llm::{LlmClient, LlmRequest};
use vertical_prompt::{build_relevance_prompt, PromptLibrary};

/// Field the model must return.
pub const RELEVANCE_FIELD: &str = "is_relevant";

/// Why a relevance check produced no verdict.
#[derive(Debug, Error)]
pub enum RelevanceError {
    /// The prompt could not be built or the provider call failed
    #[error("relevance call failed: {0}")]
    Call(#[from] AppError),

    /// The completion was not a JSON object
    #[error("malformed relevance response: {0}")]
    Malformed(String),

    /// The object had no boolean `is_relevant` field
    #[error("relevance response has no boolean 'is_relevant' field")]
    MissingField,
}

/// Sampling settings shared by every call of one pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
        }
    }
}

/// Relevance checker bound to one client and model.
#[derive(Clone)]
pub struct RelevanceValidator {
    client: Arc<dyn LlmClient>,
    model: String,
    prompts: Arc<PromptLibrary>,
    settings: CallSettings,
}

impl RelevanceValidator {
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        prompts: Arc<PromptLibrary>,
        settings: CallSettings,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            prompts,
            settings,
        }
    }

    /// Ask the model for a verdict. Makes exactly one provider call.
    pub async fn check_relevance(
        &self,
        text: &str,
        industry: Industry,
    ) -> Result<bool, RelevanceError> {
        let prompt = build_relevance_prompt(&self.prompts, industry.name(), text)?;
        let request = LlmRequest::new(prompt.user, &self.model)
            .with_system(prompt.system)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = self.client.complete(&request).await?;
        tracing::debug!("Relevance response: {}", response.content);
        read_verdict(&response.content)
    }

    /// Whether `text` is relevant to `industry`, failing open.
    ///
    /// This is the only place a failed check turns into a verdict: any
    /// [`RelevanceError`] counts as relevant.
    pub async fn is_relevant(&self, text: &str, industry: Industry) -> bool {
        match self.check_relevance(text, industry).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(industry = %industry, "Relevance check failed, treating as relevant: {}", e);
                true
            }
        }
    }
}

/// Read the boolean verdict from a completion.
///
/// Accepts the object bare or wrapped in markdown code fences.
pub fn read_verdict(content: &str) -> Result<bool, RelevanceError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|inner| inner.trim().strip_suffix("```"))
        .unwrap_or(trimmed);

    let value: Value =
        serde_json::from_str(body.trim()).map_err(|e| RelevanceError::Malformed(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| RelevanceError::Malformed("expected a JSON object".to_string()))?;

    object
        .get(RELEVANCE_FIELD)
        .and_then(Value::as_bool)
        .ok_or(RelevanceError::MissingField)
}

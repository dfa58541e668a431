//! Idea service.
//!
//! Holds one binding per provider plus the shared validator and prompt
//! library, and turns raw caller input into idea sets.

use crate::generator::{IdeaGenerator, ProviderBinding};
use crate::types::{Brief, IdeaRequest, IdeaSet, Industry, IDEA_COUNT};
use crate::validator::{CallSettings, RelevanceValidator};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use vertical_core::{AppConfig, AppError, AppResult};
use vertical_llm::{create_client, ClientOptions, ProviderType};
use vertical_prompt::{IdeaKind, PromptLibrary};

/// Result of a slot-oriented generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// The pipeline ran to completion
    Generated(IdeaSet),
    /// Input was rejected before any network call
    Invalid { message: String },
    /// The batch call failed
    Failed { error: String },
}

impl GenerationOutcome {
    /// The three strings shown to the user, in slot order.
    pub fn slots(&self) -> [String; IDEA_COUNT] {
        match self {
            Self::Generated(set) => set.display_texts(),
            Self::Invalid { message } => std::array::from_fn(|_| message.clone()),
            Self::Failed { error } => std::array::from_fn(|_| format!("Error: {}", error)),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Entry point for generating captions and content ideas.
pub struct IdeaService {
    openai: ProviderBinding,
    claude: ProviderBinding,
    validator: RelevanceValidator,
    prompts: Arc<PromptLibrary>,
    settings: CallSettings,
    parallel_items: bool,
}

impl IdeaService {
    /// Create a service from prebuilt bindings.
    ///
    /// Relevance checks always use the binding named by `validator_provider`,
    /// whichever provider generated the ideas.
    pub fn new(
        openai: ProviderBinding,
        claude: ProviderBinding,
        validator_provider: ProviderType,
        prompts: PromptLibrary,
        settings: CallSettings,
    ) -> Self {
        let prompts = Arc::new(prompts);
        let validator_binding = match validator_provider {
            ProviderType::OpenAI => &openai,
            ProviderType::Claude => &claude,
        };
        let validator = RelevanceValidator::new(
            validator_binding.client.clone(),
            validator_binding.model.clone(),
            prompts.clone(),
            settings,
        );

        Self {
            openai,
            claude,
            validator,
            prompts,
            settings,
            parallel_items: false,
        }
    }

    /// Build real provider clients from configuration.
    ///
    /// # Errors
    /// Returns `AppError::Config` when an API key is missing or the validator
    /// provider is unknown.
    pub fn from_config(config: &AppConfig, prompts: PromptLibrary) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.generation.timeout_secs);
        let openai = bind(config, ProviderType::OpenAI, timeout)?;
        let claude = bind(config, ProviderType::Claude, timeout)?;

        let validator_provider = ProviderType::parse(&config.generation.validator_provider)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "Unknown validator provider: {}",
                    config.generation.validator_provider
                ))
            })?;

        let settings = CallSettings {
            temperature: config.generation.temperature,
            max_tokens: config.generation.max_tokens,
        };

        tracing::debug!(
            openai_model = %openai.model,
            claude_model = %claude.model,
            validator = %validator_provider,
            "Idea service ready"
        );

        Ok(Self::new(openai, claude, validator_provider, prompts, settings)
            .with_parallel_items(config.generation.parallel_items))
    }

    /// Process the three items of a set concurrently.
    pub fn with_parallel_items(mut self, parallel_items: bool) -> Self {
        self.parallel_items = parallel_items;
        self
    }

    /// The binding used for a provider choice.
    pub fn binding(&self, provider: ProviderType) -> &ProviderBinding {
        match provider {
            ProviderType::OpenAI => &self.openai,
            ProviderType::Claude => &self.claude,
        }
    }

    /// A generator fixed to one provider for the whole request.
    pub fn generator(&self, provider: ProviderType) -> IdeaGenerator {
        IdeaGenerator::new(
            self.binding(provider).clone(),
            self.validator.clone(),
            self.prompts.clone(),
            self.settings,
        )
        .with_parallel_items(self.parallel_items)
    }

    /// Generate an idea set for a validated request.
    pub async fn generate(&self, request: &IdeaRequest) -> AppResult<IdeaSet> {
        self.generator(request.provider)
            .generate(request.kind, &request.brief, request.industry)
            .await
    }

    /// Generate from raw caller input.
    ///
    /// Never fails: rejected input repeats its message in every slot and a
    /// failed batch call repeats the error.
    pub async fn generate_slots(
        &self,
        brief: &str,
        industry: &str,
        provider: ProviderType,
        kind: IdeaKind,
    ) -> GenerationOutcome {
        let request = match IdeaRequest::new(brief, industry, kind, provider) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!("Rejected request: {}", e);
                return GenerationOutcome::Invalid {
                    message: e.to_string(),
                };
            }
        };

        match self.generate(&request).await {
            Ok(set) => GenerationOutcome::Generated(set),
            Err(e) => {
                tracing::error!(provider = %provider, "Error generating {}: {}", kind, e);
                GenerationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub(crate) fn brief_and_industry(brief: &str, industry: &str) -> AppResult<(Brief, Industry)> {
        Ok((Brief::new(brief)?, Industry::parse(industry)?))
    }
}

fn bind(config: &AppConfig, provider: ProviderType, timeout: Duration) -> AppResult<ProviderBinding> {
    let provider_config = config.provider_config(provider.as_str())?;
    let api_key = config.resolve_api_key(provider.as_str())?;

    let options = ClientOptions::new(api_key, timeout)
        .with_endpoint(provider_config.endpoint.clone())
        .with_api_version(provider_config.api_version.clone());

    let client = create_client(provider, options)?;
    Ok(ProviderBinding::new(client, provider_config.model.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EMPTY_BRIEF_MESSAGE, EMPTY_INDUSTRY_MESSAGE};

    #[test]
    fn test_invalid_slots_repeat_message() {
        let outcome = GenerationOutcome::Invalid {
            message: EMPTY_INDUSTRY_MESSAGE.to_string(),
        };
        assert_eq!(outcome.slots(), [EMPTY_INDUSTRY_MESSAGE; 3]);
        assert!(!outcome.is_generated());
    }

    #[test]
    fn test_failed_slots_carry_error() {
        let outcome = GenerationOutcome::Failed {
            error: "LLM error: timed out".to_string(),
        };
        for slot in outcome.slots() {
            assert_eq!(slot, "Error: LLM error: timed out");
        }
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = GenerationOutcome::Invalid {
            message: EMPTY_BRIEF_MESSAGE.to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "invalid");
        assert_eq!(json["message"], EMPTY_BRIEF_MESSAGE);
    }

    #[test]
    fn test_from_config_requires_keys() {
        let mut config = AppConfig::default();
        config.providers.openai.api_key_env = "VERTICAL_TEST_SERVICE_MISSING_OPENAI".to_string();

        let err = match IdeaService::from_config(&config, PromptLibrary::default()) {
            Err(e) => e,
            Ok(_) => panic!("expected missing key error"),
        };
        assert!(matches!(err, AppError::Config(_)));
        assert!(err
            .to_string()
            .contains("VERTICAL_TEST_SERVICE_MISSING_OPENAI"));
    }
}

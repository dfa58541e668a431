//! Idea generator.
//!
//! One batch call, one parse, then per item: check relevance, and for items
//! judged off-topic make exactly one single-item regeneration call. The same
//! code serves captions and content ideas; the [`PromptProfile`] carries
//! everything that differs between them.

use crate::parser::{parse_items, parse_single};
use crate::types::{Brief, IdeaItem, IdeaSet, Industry, RelevanceStatus, IDEA_COUNT};
use crate::validator::{CallSettings, RelevanceValidator};
use futures::future::join_all;
use std::sync::Arc;
use tracing::instrument;
use vertical_core::{AppError, AppResult};
use vertical_llm::{LlmClient, LlmRequest};
use vertical_prompt::{
    build_batch_prompt, build_single_prompt, BuiltPrompt, IdeaKind, PromptLibrary, PromptProfile,
};

/// A client together with the model it should be asked for.
#[derive(Clone)]
pub struct ProviderBinding {
    pub client: Arc<dyn LlmClient>,
    pub model: String,
}

impl ProviderBinding {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl std::fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderBinding")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .finish()
    }
}

/// Generates one idea set with a fixed provider.
///
/// Every call made while building a set, regenerations included, goes
/// through the same provider binding.
pub struct IdeaGenerator {
    provider: ProviderBinding,
    validator: RelevanceValidator,
    prompts: Arc<PromptLibrary>,
    settings: CallSettings,
    parallel_items: bool,
}

impl IdeaGenerator {
    pub fn new(
        provider: ProviderBinding,
        validator: RelevanceValidator,
        prompts: Arc<PromptLibrary>,
        settings: CallSettings,
    ) -> Self {
        Self {
            provider,
            validator,
            prompts,
            settings,
            parallel_items: false,
        }
    }

    /// Check and regenerate the three items concurrently.
    ///
    /// Output order and the one-regeneration cap are unchanged.
    pub fn with_parallel_items(mut self, parallel_items: bool) -> Self {
        self.parallel_items = parallel_items;
        self
    }

    /// Generate a relevance-checked idea set.
    ///
    /// # Errors
    /// A failing batch call (or an unrenderable prompt) aborts the whole set.
    /// Failures after that point degrade individual items instead.
    #[instrument(skip(self, brief), fields(provider = %self.provider.client.provider_name()))]
    pub async fn generate(
        &self,
        kind: IdeaKind,
        brief: &Brief,
        industry: Industry,
    ) -> AppResult<IdeaSet> {
        let profile = self.prompts.profile(kind);
        tracing::info!("Generating {} ideas for {}", kind, industry);

        let prompt = build_batch_prompt(profile, industry.name(), brief.as_str())?;
        let raw = self.complete(prompt).await?;
        tracing::debug!("Raw response: {}", raw);

        let parsed = parse_items(&raw, &profile.candidate_keys, IDEA_COUNT);
        tracing::debug!(tier = ?parsed.tier, "Parsed batch response");

        let mut items: [IdeaItem; IDEA_COUNT] =
            into_slots(parsed.items).map(IdeaItem::unvalidated);

        if self.parallel_items {
            let refined = join_all(
                items
                    .iter()
                    .enumerate()
                    .map(|(position, item)| self.refine(position, item, profile, brief, industry)),
            )
            .await;
            for (slot, item) in items.iter_mut().zip(refined) {
                *slot = item;
            }
        } else {
            for (position, slot) in items.iter_mut().enumerate() {
                *slot = self.refine(position, slot, profile, brief, industry).await;
            }
        }

        let set = IdeaSet::new(kind, items);
        tracing::info!(
            low_relevance = set.low_relevance_count(),
            "Final {} ideas ready",
            kind
        );
        Ok(set)
    }

    /// Validate one item, regenerating it at most once.
    async fn refine(
        &self,
        position: usize,
        item: &IdeaItem,
        profile: &PromptProfile,
        brief: &Brief,
        industry: Industry,
    ) -> IdeaItem {
        if self.validator.is_relevant(&item.text, industry).await {
            return IdeaItem {
                text: item.text.clone(),
                status: RelevanceStatus::Relevant,
                regenerated: false,
            };
        }

        tracing::warn!(
            position = position + 1,
            "Idea not relevant to {}: {}",
            industry,
            item.text
        );

        match self.regenerate(profile, brief, industry).await {
            Ok(replacement) => {
                let status = if self.validator.is_relevant(&replacement, industry).await {
                    RelevanceStatus::Relevant
                } else {
                    tracing::warn!(
                        position = position + 1,
                        "Regenerated idea still not relevant to {}: {}",
                        industry,
                        replacement
                    );
                    RelevanceStatus::LowRelevance
                };
                IdeaItem {
                    text: replacement,
                    status,
                    regenerated: true,
                }
            }
            Err(e) => {
                tracing::warn!(position = position + 1, "Error regenerating idea: {}", e);
                IdeaItem {
                    text: item.text.clone(),
                    status: RelevanceStatus::LowRelevance,
                    regenerated: false,
                }
            }
        }
    }

    /// Ask for one replacement item.
    async fn regenerate(
        &self,
        profile: &PromptProfile,
        brief: &Brief,
        industry: Industry,
    ) -> AppResult<String> {
        let prompt = build_single_prompt(profile, industry.name(), brief.as_str())?;
        let raw = self.complete(prompt).await?;

        let keys: Vec<&str> = profile
            .single_keys
            .iter()
            .chain(profile.candidate_keys.iter())
            .map(String::as_str)
            .collect();

        parse_single(&raw, &keys)
            .ok_or_else(|| AppError::Llm("Regeneration returned empty text".to_string()))
    }

    async fn complete(&self, prompt: BuiltPrompt) -> AppResult<String> {
        let request = LlmRequest::new(prompt.user, &self.provider.model)
            .with_system(prompt.system)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = self.provider.client.complete(&request).await?;
        Ok(response.content)
    }
}

/// The parser always yields [`IDEA_COUNT`] items; placeholders cover the rest.
fn into_slots(items: Vec<String>) -> [String; IDEA_COUNT] {
    let mut items = items.into_iter();
    std::array::from_fn(|i| {
        items
            .next()
            .unwrap_or_else(|| format!("Default idea {}", i + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_slots_exact() {
        let slots = into_slots(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(slots, ["a", "b", "c"]);
    }

    #[test]
    fn test_into_slots_pads_short_input() {
        let slots = into_slots(vec!["a".into()]);
        assert_eq!(slots, ["a", "Default idea 2", "Default idea 3"]);
    }
}

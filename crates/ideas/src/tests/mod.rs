//! Pipeline scenarios driven by scripted providers.


use crate::generator::ProviderBinding;
use crate::service::IdeaService;
use crate::validator::{CallSettings, RELEVANCE_FIELD};
use std::sync::Arc;
use vertical_core::AppResult;
use vertical_llm::{LlmRequest, MockClient, ProviderType};
use vertical_prompt::PromptLibrary;

pub(crate) const OPENAI_MODEL: &str = "gpt-4";
pub(crate) const CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

/// What a recorded request was asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Batch,
    Single,
    Relevance,
}

pub(crate) fn call_kind(request: &LlmRequest) -> CallKind {
    let system = request.system.as_deref().unwrap_or_default();
    if system.contains(RELEVANCE_FIELD) {
        CallKind::Relevance
    } else if system.contains("Generate ONE") {
        CallKind::Single
    } else {
        CallKind::Batch
    }
}

pub(crate) fn count(client: &MockClient, kind: CallKind) -> usize {
    client
        .requests()
        .iter()
        .filter(|request| call_kind(request) == kind)
        .count()
}

/// A provider answering batch, single-item and relevance prompts.
///
/// `relevant` receives the text under review.
pub(crate) fn scripted<B, S, R>(batch: B, single: S, relevant: R) -> MockClient
where
    B: Fn(&LlmRequest) -> AppResult<String> + Send + Sync + 'static,
    S: Fn() -> AppResult<String> + Send + Sync + 'static,
    R: Fn(&str) -> bool + Send + Sync + 'static,
{
    MockClient::new(move |request| match call_kind(request) {
        CallKind::Batch => batch(request),
        CallKind::Single => single(),
        CallKind::Relevance => Ok(format!(
            r#"{{"{}": {}}}"#,
            RELEVANCE_FIELD,
            relevant(&request.prompt)
        )),
    })
}

pub(crate) fn captions_json(items: [&str; 3]) -> String {
    serde_json::json!({ "captions": items }).to_string()
}

/// Service whose validator runs on the OpenAI binding.
pub(crate) fn service(openai: &Arc<MockClient>, claude: &Arc<MockClient>) -> IdeaService {
    service_validated_by(openai, claude, ProviderType::OpenAI)
}

pub(crate) fn service_validated_by(
    openai: &Arc<MockClient>,
    claude: &Arc<MockClient>,
    validator: ProviderType,
) -> IdeaService {
    IdeaService::new(
        ProviderBinding::new(openai.clone(), OPENAI_MODEL),
        ProviderBinding::new(claude.clone(), CLAUDE_MODEL),
        validator,
        PromptLibrary::default(),
        CallSettings::default(),
    )
}

//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptLibrary, PromptProfile};
use handlebars::Handlebars;
use std::collections::HashMap;
use vertical_core::{AppError, AppResult};

/// Build the prompt asking for all items of a kind at once.
///
/// The system message is the profile's batch template rendered with the
/// industry; the user message is the campaign brief.
///
/// # Example
/// ```
/// use vertical_prompt::{build_batch_prompt, PromptProfile};
///
/// let built = build_batch_prompt(&PromptProfile::caption(), "Fitness", "Spring 10k").unwrap();
/// assert!(built.system.contains("specializing in Fitness"));
/// assert_eq!(built.user, "Spring 10k");
/// ```
pub fn build_batch_prompt(
    profile: &PromptProfile,
    industry: &str,
    brief: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building batch prompt: {}", profile.id);
    Ok(BuiltPrompt {
        system: render_template(&profile.batch_template, &industry_vars(industry))?,
        user: brief.to_string(),
        source_prompt_id: profile.id.clone(),
    })
}

/// Build the prompt asking for a single replacement item.
pub fn build_single_prompt(
    profile: &PromptProfile,
    industry: &str,
    brief: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building single-item prompt: {}", profile.id);
    Ok(BuiltPrompt {
        system: render_template(&profile.single_template, &industry_vars(industry))?,
        user: brief.to_string(),
        source_prompt_id: format!("{}.single", profile.id),
    })
}

/// Build the relevance-check prompt for one piece of text.
pub fn build_relevance_prompt(
    library: &PromptLibrary,
    industry: &str,
    text: &str,
) -> AppResult<BuiltPrompt> {
    Ok(BuiltPrompt {
        system: render_template(&library.relevance_template, &industry_vars(industry))?,
        user: text.to_string(),
        source_prompt_id: "relevance.default".to_string(),
    })
}

fn industry_vars(industry: &str) -> HashMap<String, String> {
    let mut variables = HashMap::new();
    variables.insert("industry".to_string(), industry.to_string());
    variables
}

/// Render a Handlebars template with variables.
pub(crate) fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdeaKind;

    #[test]
    fn test_render_simple_template() {
        let result = render_template("Industry: {{industry}}", &industry_vars("Food & Drink"));
        assert_eq!(result.unwrap(), "Industry: Food & Drink");
    }

    #[test]
    fn test_render_invalid_template() {
        let result = render_template("{{#if}}", &industry_vars("Tech"));
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_batch_prompt_embeds_industry_and_key() {
        let library = PromptLibrary::default();
        let built =
            build_batch_prompt(library.profile(IdeaKind::Content), "Travel", "Brief").unwrap();

        assert!(built.system.contains("specializing in Travel"));
        assert!(built.system.contains("relevant to the Travel industry"));
        assert!(built.system.contains("'content_ideas'"));
        assert_eq!(built.user, "Brief");
        assert_eq!(built.source_prompt_id, "content.default");
    }

    #[test]
    fn test_single_prompt_asks_for_one_item() {
        let built = build_single_prompt(&PromptProfile::caption(), "Music", "Brief").unwrap();
        assert!(built.system.contains("Generate ONE short, engaging caption idea"));
        assert_eq!(built.source_prompt_id, "caption.default.single");
    }

    #[test]
    fn test_relevance_prompt_carries_text_as_user() {
        let built =
            build_relevance_prompt(&PromptLibrary::default(), "Gaming", "Level up!").unwrap();
        assert!(built.system.contains("relevant to the Gaming industry"));
        assert_eq!(built.user, "Level up!");
    }
}

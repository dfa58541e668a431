//! Prompt types for the vertical content generator.

use serde::{Deserialize, Serialize};

/// The two kinds of ideas the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaKind {
    /// Short social-media captions
    Caption,
    /// Longer content ideas for posts
    Content,
}

impl IdeaKind {
    /// Parse an idea kind from its name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "caption" | "captions" => Some(Self::Caption),
            "content" | "contents" | "content-ideas" => Some(Self::Content),
            _ => None,
        }
    }

    /// Canonical name, also the override file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Caption => "caption",
            Self::Content => "content",
        }
    }
}

impl std::fmt::Display for IdeaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that differs between caption and content generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptProfile {
    /// Prompt identifier, reported in built prompts
    pub id: String,

    /// System template asking for all items as a JSON object
    #[serde(rename = "batchTemplate")]
    pub batch_template: String,

    /// System template asking for one plain-text replacement item
    #[serde(rename = "singleTemplate")]
    pub single_template: String,

    /// Field names tried, in order, when reading the batch response
    #[serde(rename = "candidateKeys")]
    pub candidate_keys: Vec<String>,

    /// Field names accepted when a single-item response comes back as JSON
    #[serde(rename = "singleKeys", default)]
    pub single_keys: Vec<String>,
}

impl PromptProfile {
    /// Built-in caption profile.
    pub fn caption() -> Self {
        Self {
            id: "caption.default".to_string(),
            batch_template: "You are a creative strategist for a digital agency specializing in {{industry}}. \
Based on the following campaign brief, generate exactly three short, engaging caption ideas for social media posts. \
Each caption MUST be specifically relevant to the {{industry}} industry. \
Return ONLY a valid JSON object with a single key: 'captions', whose value is an array of three strings. \
No commentary, no extra fields, no markdown, no code block."
                .to_string(),
            single_template: "You are a creative strategist for a digital agency specializing in {{industry}}. \
Generate ONE short, engaging caption idea for social media posts that is specifically relevant to the {{industry}} industry. \
Return ONLY the caption text, with no additional formatting or structure."
                .to_string(),
            candidate_keys: vec!["captions".to_string(), "caption_ideas".to_string()],
            single_keys: vec!["caption".to_string()],
        }
    }

    /// Built-in content-idea profile.
    pub fn content() -> Self {
        Self {
            id: "content.default".to_string(),
            batch_template: "You are a creative strategist for a digital agency specializing in {{industry}}. \
Based on the following campaign brief, generate exactly three detailed content ideas for social media posts. \
Each idea MUST be specifically relevant to the {{industry}} industry. \
Return ONLY a valid JSON object with a single key: 'content_ideas', whose value is an array of three strings. \
No commentary, no extra fields, no markdown, no code block."
                .to_string(),
            single_template: "You are a creative strategist for a digital agency specializing in {{industry}}. \
Generate ONE detailed content idea for social media posts that is specifically relevant to the {{industry}} industry. \
Return ONLY the content idea text, with no additional formatting or structure."
                .to_string(),
            candidate_keys: vec![
                "content_ideas".to_string(),
                "contents".to_string(),
                "content".to_string(),
            ],
            single_keys: vec!["content_idea".to_string(), "content".to_string()],
        }
    }
}

/// Default relevance-check system template.
pub const DEFAULT_RELEVANCE_TEMPLATE: &str = "You are an industry expert. \
Evaluate if the following content is relevant to the {{industry}} industry. \
Consider industry-specific terminology, themes, and context. \
Return ONLY a JSON object with a single boolean field 'is_relevant'.";

/// All prompts used by one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptLibrary {
    pub caption: PromptProfile,
    pub content: PromptProfile,

    /// System template for relevance checks
    #[serde(rename = "relevanceTemplate")]
    pub relevance_template: String,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            caption: PromptProfile::caption(),
            content: PromptProfile::content(),
            relevance_template: DEFAULT_RELEVANCE_TEMPLATE.to_string(),
        }
    }
}

impl PromptLibrary {
    /// Profile for an idea kind.
    pub fn profile(&self, kind: IdeaKind) -> &PromptProfile {
        match kind {
            IdeaKind::Caption => &self.caption,
            IdeaKind::Content => &self.content,
        }
    }

    pub(crate) fn profile_mut(&mut self, kind: IdeaKind) -> &mut PromptProfile {
        match kind {
            IdeaKind::Caption => &mut self.caption,
            IdeaKind::Content => &mut self.content,
        }
    }
}

/// A partial profile loaded from `.vertical/prompts/<kind>.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptOverride {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "batchTemplate", default)]
    pub batch_template: Option<String>,

    #[serde(rename = "singleTemplate", default)]
    pub single_template: Option<String>,

    #[serde(rename = "candidateKeys", default)]
    pub candidate_keys: Option<Vec<String>>,

    #[serde(rename = "singleKeys", default)]
    pub single_keys: Option<Vec<String>>,

    /// Only meaningful in `relevance.yml`
    #[serde(default)]
    pub template: Option<String>,
}

impl PromptOverride {
    /// Apply the set fields on top of a profile.
    pub fn apply(self, profile: &mut PromptProfile) {
        if let Some(id) = self.id {
            profile.id = id;
        }
        if let Some(batch_template) = self.batch_template {
            profile.batch_template = batch_template;
        }
        if let Some(single_template) = self.single_template {
            profile.single_template = single_template;
        }
        if let Some(candidate_keys) = self.candidate_keys {
            profile.candidate_keys = candidate_keys;
        }
        if let Some(single_keys) = self.single_keys {
            profile.single_keys = single_keys;
        }
    }
}

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: String,

    /// User message
    pub user: String,

    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idea_kind_parse() {
        assert_eq!(IdeaKind::parse("captions"), Some(IdeaKind::Caption));
        assert_eq!(IdeaKind::parse("Content"), Some(IdeaKind::Content));
        assert_eq!(IdeaKind::parse("video"), None);
        assert_eq!(IdeaKind::Caption.to_string(), "caption");
    }

    #[test]
    fn test_default_candidate_keys() {
        let library = PromptLibrary::default();
        assert_eq!(
            library.profile(IdeaKind::Caption).candidate_keys,
            vec!["captions", "caption_ideas"]
        );
        assert_eq!(
            library.profile(IdeaKind::Content).candidate_keys,
            vec!["content_ideas", "contents", "content"]
        );
    }

    #[test]
    fn test_override_applies_only_set_fields() {
        let mut profile = PromptProfile::caption();
        let yaml = r#"
id: caption.punchy
candidateKeys: [lines]
"#;
        let over: PromptOverride = serde_yaml::from_str(yaml).unwrap();
        over.apply(&mut profile);

        assert_eq!(profile.id, "caption.punchy");
        assert_eq!(profile.candidate_keys, vec!["lines"]);
        assert_eq!(profile.batch_template, PromptProfile::caption().batch_template);
    }

    #[test]
    fn test_relevance_template_mentions_field() {
        assert!(PromptLibrary::default()
            .relevance_template
            .contains("'is_relevant'"));
    }
}

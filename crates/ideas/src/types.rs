//! Domain types for idea generation.

use serde::{Deserialize, Serialize};
use vertical_core::{AppError, AppResult};
use vertical_llm::ProviderType;
use vertical_prompt::IdeaKind;

/// Number of items in every idea set.
pub const IDEA_COUNT: usize = 3;

/// Suffix appended to low-relevance items when rendered as plain text.
pub const LOW_RELEVANCE_MARKER: &str = " (low relevance)";

/// Message shown in every slot when the brief is empty.
pub const EMPTY_BRIEF_MESSAGE: &str = "Please enter a campaign brief";

/// Message shown in every slot when no industry is selected.
pub const EMPTY_INDUSTRY_MESSAGE: &str = "Please select an industry";

/// A campaign brief. Guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brief(String);

impl Brief {
    /// Validate and wrap a brief. The original text is kept untrimmed.
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::Validation(EMPTY_BRIEF_MESSAGE.to_string()));
        }
        Ok(Self(text))
    }

    /// The brief as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The brief without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }
}

/// Industry categories a campaign can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Lifestyle,
    Fitness,
    Music,
    Fashion,
    Food,
    Tech,
    Travel,
    Gaming,
    Parenting,
    Education,
    Entertainment,
    Beauty,
    Sports,
    Comedy,
}

impl Industry {
    /// Every industry, in display order.
    pub const ALL: [Industry; 14] = [
        Industry::Lifestyle,
        Industry::Fitness,
        Industry::Music,
        Industry::Fashion,
        Industry::Food,
        Industry::Tech,
        Industry::Travel,
        Industry::Gaming,
        Industry::Parenting,
        Industry::Education,
        Industry::Entertainment,
        Industry::Beauty,
        Industry::Sports,
        Industry::Comedy,
    ];

    /// Display name, as embedded in prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Industry::Lifestyle => "Lifestyle",
            Industry::Fitness => "Fitness",
            Industry::Music => "Music",
            Industry::Fashion => "Fashion",
            Industry::Food => "Food",
            Industry::Tech => "Tech",
            Industry::Travel => "Travel",
            Industry::Gaming => "Gaming",
            Industry::Parenting => "Parenting",
            Industry::Education => "Education",
            Industry::Entertainment => "Entertainment",
            Industry::Beauty => "Beauty",
            Industry::Sports => "Sports",
            Industry::Comedy => "Comedy",
        }
    }

    /// Parse an industry name, case-insensitively.
    ///
    /// An empty name yields the "select an industry" validation message.
    pub fn parse(s: &str) -> AppResult<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(AppError::Validation(EMPTY_INDUSTRY_MESSAGE.to_string()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|industry| industry.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown industry: {}. Choose one of: {}",
                    name,
                    Self::ALL.map(|i| i.name()).join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One generation request. Immutable for the duration of the call.
#[derive(Debug, Clone)]
pub struct IdeaRequest {
    pub brief: Brief,
    pub industry: Industry,
    pub kind: IdeaKind,
    pub provider: ProviderType,
}

impl IdeaRequest {
    /// Validate raw caller input into a request.
    ///
    /// The brief is checked before the industry.
    pub fn new(
        brief: &str,
        industry: &str,
        kind: IdeaKind,
        provider: ProviderType,
    ) -> AppResult<Self> {
        Ok(Self {
            brief: Brief::new(brief)?,
            industry: Industry::parse(industry)?,
            kind,
            provider,
        })
    }
}

/// Relevance state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceStatus {
    /// Not yet checked
    Unvalidated,
    /// Judged relevant, or the check failed open
    Relevant,
    /// Still judged off-topic after the single regeneration attempt
    LowRelevance,
}

/// A single generated idea.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaItem {
    /// Text as produced by the model
    pub text: String,

    /// Relevance outcome
    pub status: RelevanceStatus,

    /// Whether the text came from a single-item regeneration call
    pub regenerated: bool,
}

impl IdeaItem {
    /// A freshly parsed item.
    pub fn unvalidated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: RelevanceStatus::Unvalidated,
            regenerated: false,
        }
    }

    pub fn is_low_relevance(&self) -> bool {
        self.status == RelevanceStatus::LowRelevance
    }

    /// Text for plain rendering, with the low-relevance marker when needed.
    pub fn display_text(&self) -> String {
        if self.is_low_relevance() {
            format!("{}{}", self.text, LOW_RELEVANCE_MARKER)
        } else {
            self.text.clone()
        }
    }
}

/// Exactly [`IDEA_COUNT`] ideas in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaSet {
    pub kind: IdeaKind,
    items: [IdeaItem; IDEA_COUNT],
}

impl IdeaSet {
    pub fn new(kind: IdeaKind, items: [IdeaItem; IDEA_COUNT]) -> Self {
        Self { kind, items }
    }

    pub fn items(&self) -> &[IdeaItem; IDEA_COUNT] {
        &self.items
    }

    /// Rendered slot texts, marker included.
    pub fn display_texts(&self) -> [String; IDEA_COUNT] {
        self.items.each_ref().map(IdeaItem::display_text)
    }

    pub fn low_relevance_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_low_relevance()).count()
    }
}

//! Idea pipeline for the vertical content generator.
//!
//! Turns a campaign brief and an industry into exactly three caption or
//! content ideas:
//! - [`parser`]: tiered extraction of items from free-form model output
//! - [`validator`]: fail-open relevance checks
//! - [`generator`]: batch call, per-item validation, one regeneration
//! - [`service`]: provider selection and slot-oriented results
//! - [`campaign`]: captions plus content ideas for one brief

pub mod campaign;
pub mod generator;
pub mod parser;
pub mod service;
pub mod types;
pub mod validator;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use campaign::{campaign_context, CampaignBundle, Demographics};
pub use generator::{IdeaGenerator, ProviderBinding};
pub use parser::{parse, parse_items, parse_single, ParseTier, ParsedItems};
pub use service::{GenerationOutcome, IdeaService};
pub use types::{
    Brief, IdeaItem, IdeaRequest, IdeaSet, Industry, RelevanceStatus, EMPTY_BRIEF_MESSAGE,
    EMPTY_INDUSTRY_MESSAGE, IDEA_COUNT, LOW_RELEVANCE_MARKER,
};
pub use validator::{CallSettings, RelevanceError, RelevanceValidator};

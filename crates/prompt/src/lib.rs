//! Prompt system for the vertical content generator.
//!
//! This crate provides the kind-specific prompt configuration used by the
//! idea pipeline:
//! - Built-in prompt profiles for captions and content ideas
//! - Handlebars template rendering with the industry name
//! - Optional YAML overrides from `.vertical/prompts/`

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_batch_prompt, build_relevance_prompt, build_single_prompt};
pub use loader::{list_overrides, load_library};
pub use types::{BuiltPrompt, IdeaKind, PromptLibrary, PromptOverride, PromptProfile};

//! Captions and content command handler.
//!
//! Generates one relevance-checked set of three ideas for a brief.

use super::{build_service, parse_provider, read_brief};
use clap::Args;
use vertical_core::{config::AppConfig, AppResult};
use vertical_ideas::GenerationOutcome;
use vertical_prompt::IdeaKind;
use std::path::PathBuf;

/// Generate three ideas for a campaign brief
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Campaign brief text
    pub brief: Option<String>,

    /// Read the brief from a file
    #[arg(short, long, conflicts_with = "brief")]
    pub file: Option<PathBuf>,

    /// Target industry (see `vertical industries`)
    #[arg(short, long, default_value = "")]
    pub industry: String,

    /// Model used for generation (gpt-4, claude)
    #[arg(short, long, default_value = "gpt-4")]
    pub model: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateCommand {
    /// Execute the command for one idea kind.
    pub async fn execute(&self, config: &AppConfig, kind: IdeaKind) -> AppResult<()> {
        tracing::info!("Executing {} command", kind);
        tracing::debug!("Generate options: {:?}", self);

        let provider = parse_provider(&self.model)?;
        let brief = read_brief(self.brief.as_deref(), self.file.as_deref())?;

        let service = build_service(config)?;
        let outcome = service
            .generate_slots(&brief, &self.industry, provider, kind)
            .await;

        if self.json {
            let json = serde_json::to_string_pretty(&outcome)?;
            println!("{}", json);
        } else {
            for (position, slot) in outcome.slots().iter().enumerate() {
                println!("{}. {}", position + 1, slot);
            }
        }

        if let GenerationOutcome::Generated(set) = &outcome {
            let regenerated = set.items().iter().filter(|item| item.regenerated).count();
            tracing::info!(
                regenerated,
                low_relevance = set.low_relevance_count(),
                "Generated {} ideas",
                kind
            );
            for item in set.items().iter().filter(|item| item.is_low_relevance()) {
                tracing::debug!("Low relevance item: {}", item.text);
            }
        }

        Ok(())
    }
}

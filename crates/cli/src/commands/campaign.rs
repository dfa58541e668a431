//! Campaign command handler.
//!
//! Generates captions and content ideas for one brief, framed by the
//! target demographics.

use super::{build_service, parse_provider, read_brief};
use clap::Args;
use std::path::PathBuf;
use vertical_core::{config::AppConfig, AppResult};
use vertical_ideas::{CampaignBundle, Demographics};

/// Generate captions and content ideas for a campaign
#[derive(Args, Debug)]
pub struct CampaignCommand {
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

    /// Target age range, repeatable (default: 18–24, 25–34)
    #[arg(long = "age-range")]
    pub age_ranges: Vec<String>,

    /// Target gender, repeatable (default: Male, Female)
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CampaignCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing campaign command");
        tracing::debug!("Campaign options: {:?}", self);

        let provider = parse_provider(&self.model)?;
        let brief = read_brief(self.brief.as_deref(), self.file.as_deref())?;

        let demographics = if self.age_ranges.is_empty() && self.genders.is_empty() {
            None
        } else {
            Some(Demographics {
                age_ranges: self.age_ranges.clone(),
                genders: self.genders.clone(),
            })
        };

        let service = build_service(config)?;
        let bundle = match service
            .generate_campaign(&brief, &self.industry, provider, demographics)
            .await
        {
            Ok(bundle) => bundle,
            Err(e) if e.is_validation() => {
                tracing::info!("Rejected campaign: {}", e);
                if self.json {
                    let output = serde_json::json!({ "outcome": "invalid", "message": e.to_string() });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                } else {
                    println!("{}", e);
                }
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if self.json {
            let json = serde_json::to_string_pretty(&bundle)?;
            println!("{}", json);
        } else {
            print_bundle(&bundle);
        }

        Ok(())
    }
}

fn print_bundle(bundle: &CampaignBundle) {
    println!("Brief: {}", bundle.summary);
    println!(
        "Audience: {} / {}",
        bundle.demographics.age_ranges.join(", "),
        bundle.demographics.genders.join(", ")
    );

    println!();
    println!("Captions:");
    for (position, caption) in bundle.captions.display_texts().iter().enumerate() {
        println!("  {}. {}", position + 1, caption);
    }

    println!();
    println!("Content ideas:");
    for (position, idea) in bundle.content.display_texts().iter().enumerate() {
        println!("  {}. {}", position + 1, idea);
    }
}

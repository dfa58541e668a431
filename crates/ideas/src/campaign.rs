//! Campaign bundles: captions and content ideas for one brief.

use crate::service::IdeaService;
use crate::types::{Brief, IdeaSet};
use serde::{Deserialize, Serialize};
use vertical_core::AppResult;
use vertical_llm::ProviderType;
use vertical_prompt::IdeaKind;

/// Target audience for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(rename = "ageRanges")]
    pub age_ranges: Vec<String>,
    pub genders: Vec<String>,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            age_ranges: vec!["18–24".to_string(), "25–34".to_string()],
            genders: vec!["Male".to_string(), "Female".to_string()],
        }
    }
}

impl Demographics {
    /// Fill empty lists from the defaults.
    pub fn or_defaults(self) -> Self {
        let defaults = Self::default();
        Self {
            age_ranges: if self.age_ranges.is_empty() {
                defaults.age_ranges
            } else {
                self.age_ranges
            },
            genders: if self.genders.is_empty() {
                defaults.genders
            } else {
                self.genders
            },
        }
    }
}

/// Wrap the trimmed brief in a demographics block.
pub fn campaign_context(brief: &Brief, demographics: &Demographics) -> String {
    let label = if *demographics == Demographics::default() {
        "Demographics (default values used):"
    } else {
        "Demographics:"
    };

    format!(
        "{}\n- Age Range: {}\n- Gender: {}\n\nOriginal Brief:\n{}\n",
        label,
        demographics.age_ranges.join(", "),
        demographics.genders.join(", "),
        brief.trimmed()
    )
}

/// Everything generated for one campaign brief.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignBundle {
    /// The trimmed brief
    pub summary: String,
    pub demographics: Demographics,
    pub captions: IdeaSet,
    pub content: IdeaSet,
}

impl IdeaService {
    /// Generate captions, then content ideas, for one brief with one provider.
    ///
    /// # Errors
    /// Empty brief or industry fails with `AppError::Validation` before any
    /// call. A failing batch call for either set aborts the bundle.
    pub async fn generate_campaign(
        &self,
        brief: &str,
        industry: &str,
        provider: ProviderType,
        demographics: Option<Demographics>,
    ) -> AppResult<CampaignBundle> {
        let (brief, industry) = Self::brief_and_industry(brief, industry)?;
        let demographics = demographics.unwrap_or_default().or_defaults();

        let context = Brief::new(campaign_context(&brief, &demographics))?;
        tracing::info!(industry = %industry, provider = %provider, "Generating campaign");

        let generator = self.generator(provider);
        let captions = generator
            .generate(IdeaKind::Caption, &context, industry)
            .await?;
        let content = generator
            .generate(IdeaKind::Content, &context, industry)
            .await?;

        Ok(CampaignBundle {
            summary: brief.trimmed().to_string(),
            demographics,
            captions,
            content,
        })
    }
}

//! Command handlers for the vertical CLI.
//!
//! This module organizes all CLI commands into separate submodules, plus the
//! input and service plumbing they share.

pub mod campaign;
pub mod generate;
pub mod industries;

// Re-export command types for convenience
pub use campaign::CampaignCommand;
pub use generate::GenerateCommand;
pub use industries::IndustriesCommand;

use std::path::Path;
use vertical_core::{config::AppConfig, AppError, AppResult};
use vertical_ideas::IdeaService;
use vertical_llm::ProviderType;
use vertical_prompt::{list_overrides, load_library};

/// Map a `--model` choice to its provider.
pub(crate) fn parse_provider(model: &str) -> AppResult<ProviderType> {
    ProviderType::parse(model).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown model: {}. Supported: gpt-4, claude",
            model
        ))
    })
}

/// The brief from the positional argument or `--file`.
///
/// A missing brief is passed on as empty text so the pipeline reports it.
pub(crate) fn read_brief(brief: Option<&str>, file: Option<&Path>) -> AppResult<String> {
    match (brief, file) {
        (Some(brief), _) => Ok(brief.to_string()),
        (None, Some(path)) => {
            tracing::debug!("Reading brief from {:?}", path);
            Ok(std::fs::read_to_string(path)?)
        }
        (None, None) => Ok(String::new()),
    }
}

/// Build the idea service with workspace prompt overrides applied.
pub(crate) fn build_service(config: &AppConfig) -> AppResult<IdeaService> {
    let overrides = list_overrides(&config.workspace)?;
    if !overrides.is_empty() {
        tracing::info!("Using prompt overrides: {}", overrides.join(", "));
    }

    let prompts = load_library(&config.workspace)?;
    IdeaService::from_config(config, prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider("gpt-4").unwrap(), ProviderType::OpenAI);
        assert_eq!(parse_provider("claude").unwrap(), ProviderType::Claude);
        assert!(matches!(parse_provider("llama"), Err(AppError::Config(_))));
    }

    #[test]
    fn test_read_brief_sources() {
        assert_eq!(read_brief(Some("Launch"), None).unwrap(), "Launch");
        assert_eq!(read_brief(None, None).unwrap(), "");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Brief from file").unwrap();
        assert_eq!(
            read_brief(None, Some(file.path())).unwrap(),
            "Brief from file"
        );
    }

    #[test]
    fn test_read_brief_missing_file() {
        let err = read_brief(None, Some(Path::new("/nonexistent/brief.txt"))).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}

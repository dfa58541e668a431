//! Vertical CLI
//!
//! Main entry point for the vertical command-line tool.
//! Generates industry-relevant captions and content ideas from a campaign brief.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CampaignCommand, GenerateCommand, IndustriesCommand};
use std::path::PathBuf;
use vertical_core::{
    config::AppConfig,
    logging::{self, LogFormat},
    AppError, AppResult,
};
use vertical_prompt::IdeaKind;

/// Vertical - industry-focused captions and content ideas from a campaign brief
#[derive(Parser, Debug)]
#[command(name = "vertical")]
#[command(about = "Industry-focused captions and content ideas from a campaign brief", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "VERTICAL_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "VERTICAL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long, global = true, env = "VERTICAL_LOG_FORMAT")]
    log_format: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Per-call provider timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Validate and regenerate the three items concurrently
    #[arg(long, global = true)]
    parallel_items: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate three social-media captions
    Captions(GenerateCommand),

    /// Generate three content ideas
    Content(GenerateCommand),

    /// Generate captions and content ideas for a campaign
    Campaign(CampaignCommand),

    /// List the supported industries
    Industries(IndustriesCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Captions(_) => "captions",
            Commands::Content(_) => "content",
            Commands::Campaign(_) => "campaign",
            Commands::Industries(_) => "industries",
        }
    }

    /// Whether the command talks to a provider.
    fn needs_providers(&self) -> bool {
        !matches!(self, Commands::Industries(_))
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Pick up API keys from a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load configuration (defaults, file, environment) and apply CLI overrides
    let config = AppConfig::load_with(cli.workspace, cli.config)?.with_overrides(
        cli.log_level,
        cli.log_format,
        cli.verbose,
        cli.no_color,
        cli.timeout,
        cli.parallel_items,
    );

    // Initialize logging with final configuration
    let log_format = LogFormat::parse(&config.log_format).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown log format: {}. Supported: pretty, json",
            config.log_format
        ))
    })?;
    logging::init_logging(config.log_level.as_deref(), config.no_color, log_format)?;

    tracing::info!("Vertical CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);

    // Missing credentials stop the process before any request is made
    if cli.command.needs_providers() {
        config.validate()?;
        tracing::debug!(
            openai_model = %config.providers.openai.model,
            claude_model = %config.providers.claude.model,
            "Provider credentials present"
        );
    }

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Captions(cmd) => cmd.execute(&config, IdeaKind::Caption).await,
        Commands::Content(cmd) => cmd.execute(&config, IdeaKind::Content).await,
        Commands::Campaign(cmd) => cmd.execute(&config).await,
        Commands::Industries(cmd) => cmd.execute().await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_captions() {
        let cli = Cli::try_parse_from([
            "vertical",
            "captions",
            "Summer gym promo",
            "--industry",
            "Fitness",
            "--model",
            "claude",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Captions(cmd) => {
                assert_eq!(cmd.brief.as_deref(), Some("Summer gym promo"));
                assert_eq!(cmd.industry, "Fitness");
                assert_eq!(cmd.model, "claude");
                assert!(cmd.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_campaign_demographics() {
        let cli = Cli::try_parse_from([
            "vertical",
            "campaign",
            "Retro console drop",
            "-i",
            "Gaming",
            "--age-range",
            "18–24",
            "--age-range",
            "35–44",
            "--gender",
            "Female",
        ])
        .unwrap();

        assert!(cli.command.needs_providers());
        match cli.command {
            Commands::Campaign(cmd) => {
                assert_eq!(cmd.age_ranges, ["18–24", "35–44"]);
                assert_eq!(cmd.genders, ["Female"]);
                assert_eq!(cmd.model, "gpt-4");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_brief_and_file_conflict() {
        let result = Cli::try_parse_from([
            "vertical",
            "content",
            "inline brief",
            "--file",
            "brief.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_industries_needs_no_providers() {
        let cli = Cli::try_parse_from(["vertical", "industries"]).unwrap();
        assert!(!cli.command.needs_providers());
    }
}

//! Configuration management for the vertical content generator.
//!
//! Configuration is assembled in layers, later layers winning:
//! - Built-in defaults
//! - Config file (`.vertical/config.yaml` or `VERTICAL_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Provider credentials are never stored in the file itself, only the names
//! of the environment variables holding them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default model for the OpenAI-style provider.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

/// Default model for the Anthropic-style provider.
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default `anthropic-version` header value.
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

/// Provider names understood by the configuration.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "claude"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (may contain .vertical/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Log output format ("pretty" or "json")
    pub log_format: String,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Per-provider settings
    pub providers: ProvidersConfig,

    /// Pipeline tuning
    pub generation: GenerationConfig,
}

/// Settings for a single LLM provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Environment variable holding the API key
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: String,

    /// Model identifier
    pub model: String,

    /// Base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Protocol version header (Anthropic only)
    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Settings for both providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub claude: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig {
                api_key_env: "OPENAI_API_KEY".to_string(),
                model: DEFAULT_OPENAI_MODEL.to_string(),
                endpoint: None,
                api_version: None,
            },
            claude: ProviderConfig {
                api_key_env: "ANTHROPIC_API_KEY".to_string(),
                model: DEFAULT_CLAUDE_MODEL.to_string(),
                endpoint: None,
                api_version: Some(DEFAULT_ANTHROPIC_VERSION.to_string()),
            },
        }
    }
}

impl ProvidersConfig {
    /// Look up a provider's settings by name.
    pub fn get(&self, provider: &str) -> Option<&ProviderConfig> {
        match provider.to_lowercase().as_str() {
            "openai" => Some(&self.openai),
            "claude" | "anthropic" => Some(&self.claude),
            _ => None,
        }
    }
}

/// Generation pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature for every call
    pub temperature: f32,

    /// Maximum output tokens per call
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,

    /// Per-call timeout in seconds
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Validate and regenerate the three items concurrently
    #[serde(rename = "parallelItems")]
    pub parallel_items: bool,

    /// Provider used for relevance checks
    #[serde(rename = "validatorProvider")]
    pub validator_provider: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
            timeout_secs: 60,
            parallel_items: false,
            validator_provider: "openai".to_string(),
        }
    }
}

/// Full configuration file structure. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    workspace: Option<WorkspaceSection>,
    logging: Option<LoggingSection>,
    providers: Option<ProvidersSection>,
    generation: Option<GenerationSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct WorkspaceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProvidersSection {
    openai: Option<ProviderSection>,
    claude: Option<ProviderSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderSection {
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiVersion")]
    api_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerationSection {
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
    #[serde(rename = "parallelItems")]
    parallel_items: Option<bool>,
    #[serde(rename = "validatorProvider")]
    validator_provider: Option<String>,
}

impl ProviderSection {
    fn merge_into(self, target: &mut ProviderConfig) {
        if let Some(api_key_env) = self.api_key_env {
            target.api_key_env = api_key_env;
        }
        if let Some(model) = self.model {
            target.model = model;
        }
        if self.endpoint.is_some() {
            target.endpoint = self.endpoint;
        }
        if self.api_version.is_some() {
            target.api_version = self.api_version;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            log_format: "pretty".to_string(),
            verbose: false,
            no_color: false,
            providers: ProvidersConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `VERTICAL_WORKSPACE`: Override workspace path
    /// - `VERTICAL_CONFIG`: Path to config file
    /// - `VERTICAL_OPENAI_MODEL`: Model for the OpenAI provider
    /// - `VERTICAL_CLAUDE_MODEL`: Model for the Claude provider
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use vertical_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        let workspace = std::env::var("VERTICAL_WORKSPACE").ok().map(PathBuf::from);
        let config_file = std::env::var("VERTICAL_CONFIG").ok().map(PathBuf::from);
        Self::load_with(workspace, config_file)
    }

    /// Load configuration with an explicit workspace and config file.
    ///
    /// `None` falls back to the current directory and
    /// `<workspace>/.vertical/config.yaml` respectively.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }
        config.config_file = config_file;

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => {
                if !cf.exists() {
                    return Err(AppError::Config(format!("Config file not found: {:?}", cf)));
                }
                cf.clone()
            }
            None => config.vertical_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(model) = std::env::var("VERTICAL_OPENAI_MODEL") {
            config.providers.openai.model = model;
        }

        if let Ok(model) = std::env::var("VERTICAL_CLAUDE_MODEL") {
            config.providers.claude.model = model;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Merging config file {:?}", path);

        if let Some(path) = file.workspace.and_then(|ws| ws.path) {
            self.workspace = PathBuf::from(path);
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
            if let Some(format) = logging.format {
                self.log_format = format;
            }
        }

        if let Some(providers) = file.providers {
            if let Some(openai) = providers.openai {
                openai.merge_into(&mut self.providers.openai);
            }
            if let Some(claude) = providers.claude {
                claude.merge_into(&mut self.providers.claude);
            }
        }

        if let Some(generation) = file.generation {
            let target = &mut self.generation;
            if let Some(temperature) = generation.temperature {
                target.temperature = temperature;
            }
            if let Some(max_tokens) = generation.max_tokens {
                target.max_tokens = max_tokens;
            }
            if let Some(timeout_secs) = generation.timeout_secs {
                target.timeout_secs = timeout_secs;
            }
            if let Some(parallel_items) = generation.parallel_items {
                target.parallel_items = parallel_items;
            }
            if let Some(validator_provider) = generation.validator_provider {
                target.validator_provider = validator_provider;
            }
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the file and the environment.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        log_format: Option<String>,
        verbose: bool,
        no_color: bool,
        timeout_secs: Option<u64>,
        parallel_items: bool,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if let Some(log_format) = log_format {
            self.log_format = log_format;
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        if let Some(timeout_secs) = timeout_secs {
            self.generation.timeout_secs = timeout_secs;
        }

        if parallel_items {
            self.generation.parallel_items = true;
        }

        self
    }

    /// Get the path to the .vertical directory.
    pub fn vertical_dir(&self) -> PathBuf {
        self.workspace.join(".vertical")
    }

    /// Get a provider's settings.
    pub fn provider_config(&self, provider: &str) -> AppResult<&ProviderConfig> {
        self.providers.get(provider).ok_or_else(|| {
            AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                KNOWN_PROVIDERS.join(", ")
            ))
        })
    }

    /// Resolve a provider's API key from its environment variable.
    pub fn resolve_api_key(&self, provider: &str) -> AppResult<String> {
        let provider_config = self.provider_config(provider)?;
        match std::env::var(&provider_config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::Config(format!(
                "{} not found in environment variables",
                provider_config.api_key_env
            ))),
        }
    }

    /// Validate the configuration before serving any request.
    ///
    /// Both provider keys must be present: a missing key is fatal at start-up
    /// rather than a per-request failure.
    pub fn validate(&self) -> AppResult<()> {
        for provider in KNOWN_PROVIDERS {
            self.resolve_api_key(provider)?;
        }

        let validator = &self.generation.validator_provider;
        if self.providers.get(validator).is_none() {
            return Err(AppError::Config(format!(
                "Unknown validator provider: {}. Supported: {}",
                validator,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        let generation = &self.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                generation.temperature
            )));
        }
        if generation.max_tokens == 0 {
            return Err(AppError::Config("maxTokens must be positive".to_string()));
        }
        if generation.timeout_secs == 0 {
            return Err(AppError::Config("timeoutSecs must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_key_envs(openai_env: &str, claude_env: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.providers.openai.api_key_env = openai_env.to_string();
        config.providers.claude.api_key_env = claude_env.to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.providers.openai.model, "gpt-4");
        assert_eq!(config.providers.claude.model, DEFAULT_CLAUDE_MODEL);
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.generation.max_tokens, 512);
        assert!(!config.generation.parallel_items);
        assert!(!config.verbose);
    }

    #[test]
    fn test_vertical_dir() {
        let config = AppConfig::default();
        assert!(config.vertical_dir().ends_with(".vertical"));
    }

    #[test]
    fn test_with_overrides() {
        let overridden = AppConfig::default().with_overrides(
            None,
            Some("json".to_string()),
            true,
            false,
            Some(15),
            true,
        );

        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
        assert_eq!(overridden.log_format, "json");
        assert_eq!(overridden.generation.timeout_secs, 15);
        assert!(overridden.generation.parallel_items);
    }

    #[test]
    fn test_merge_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
providers:
  openai:
    model: gpt-4o
  claude:
    endpoint: http://localhost:9999
generation:
  maxTokens: 256
  parallelItems: true
logging:
  color: false
"#,
        )
        .unwrap();

        let config =
            AppConfig::load_with(Some(temp_dir.path().to_path_buf()), Some(path)).unwrap();
        assert_eq!(config.providers.openai.model, "gpt-4o");
        assert_eq!(config.providers.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(
            config.providers.claude.endpoint.as_deref(),
            Some("http://localhost:9999")
        );
        assert_eq!(config.providers.claude.model, DEFAULT_CLAUDE_MODEL);
        assert_eq!(config.generation.max_tokens, 256);
        assert_eq!(config.generation.temperature, 0.7);
        assert!(config.generation.parallel_items);
        assert!(config.no_color);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load_with(
            Some(temp_dir.path().to_path_buf()),
            Some(temp_dir.path().join("absent.yaml")),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_missing_key_is_fatal() {
        let config = config_with_key_envs(
            "VERTICAL_TEST_MISSING_OPENAI_KEY",
            "VERTICAL_TEST_MISSING_CLAUDE_KEY",
        );
        let err = config.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("VERTICAL_TEST_MISSING_OPENAI_KEY not found"));
    }

    #[test]
    fn test_validate_with_both_keys() {
        std::env::set_var("VERTICAL_TEST_VALID_OPENAI_KEY", "sk-test");
        std::env::set_var("VERTICAL_TEST_VALID_CLAUDE_KEY", "sk-ant-test");
        let config = config_with_key_envs(
            "VERTICAL_TEST_VALID_OPENAI_KEY",
            "VERTICAL_TEST_VALID_CLAUDE_KEY",
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.resolve_api_key("claude").unwrap(), "sk-ant-test");
    }

    #[test]
    fn test_validate_blank_key_is_fatal() {
        std::env::set_var("VERTICAL_TEST_BLANK_OPENAI_KEY", "sk-test");
        std::env::set_var("VERTICAL_TEST_BLANK_CLAUDE_KEY", "   ");
        let config = config_with_key_envs(
            "VERTICAL_TEST_BLANK_OPENAI_KEY",
            "VERTICAL_TEST_BLANK_CLAUDE_KEY",
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_validator_provider() {
        std::env::set_var("VERTICAL_TEST_VP_OPENAI_KEY", "sk-test");
        std::env::set_var("VERTICAL_TEST_VP_CLAUDE_KEY", "sk-ant-test");
        let mut config =
            config_with_key_envs("VERTICAL_TEST_VP_OPENAI_KEY", "VERTICAL_TEST_VP_CLAUDE_KEY");
        config.generation.validator_provider = "ollama".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_provider_config() {
        let config = AppConfig::default();
        assert!(config.provider_config("ollama").is_err());
        assert!(config.provider_config("anthropic").is_ok());
    }
}

//! Configuration types, defaults, loading, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::CharacterDefaults;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Agent backend
    #[serde(default)]
    pub api: ApiConfig,

    /// Text-generation proxy used by the suggest affordances
    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Values baked into every character document
    #[serde(default)]
    pub agent: AgentDefaultsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Agent backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL (default: http://localhost:3000)
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Path of the creation endpoint (default: /api/agents)
    #[serde(default = "default_create_path")]
    pub create_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            create_path: default_create_path(),
        }
    }
}

impl ApiConfig {
    pub fn create_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.create_path
        )
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_create_path() -> String {
    "/api/agents".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Disable to hide the suggest shortcut entirely
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_suggest_endpoint")]
    pub endpoint: String,

    /// Ask the proxy for an SSE stream instead of a single JSON body
    #[serde(default = "default_true")]
    pub streaming: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_suggest_endpoint(),
            streaming: true,
        }
    }
}

fn default_suggest_endpoint() -> String {
    "http://localhost:3002/api/proxy/ai-chat".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefaultsConfig {
    #[serde(default = "default_template_name")]
    pub template_name: String,

    #[serde(default = "default_model_provider")]
    pub model_provider: String,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AgentDefaultsConfig {
    fn default() -> Self {
        Self {
            template_name: default_template_name(),
            model_provider: default_model_provider(),
            model: default_model(),
        }
    }
}

impl AgentDefaultsConfig {
    pub fn character_defaults(&self) -> CharacterDefaults {
        CharacterDefaults {
            model_provider: self.model_provider.clone(),
            model: self.model.clone(),
        }
    }
}

fn default_template_name() -> String {
    "trading-agent".to_string()
}

fn default_model_provider() -> String {
    "openrouter".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            suggestions: SuggestionConfig::default(),
            agent: AgentDefaultsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Canonical base directory: `~/.crabtrader/`
pub fn crabtrader_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".crabtrader")
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.crabtrader/config.toml
    /// 3. Local config: ./crabtrader.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        if let Some(system_config_path) = Self::system_config_path()
            && system_config_path.exists()
        {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::read_file(&system_config_path)?;
        }

        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::read_file(&local_config_path)?;
        }

        config.apply_env_overrides();

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply env overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Get the system config path: ~/.crabtrader/config.toml
    pub fn system_config_path() -> Option<PathBuf> {
        Some(crabtrader_home().join("config.toml"))
    }

    fn local_config_path() -> PathBuf {
        PathBuf::from("./crabtrader.toml")
    }

    /// A later file replaces the earlier one wholesale; missing sections
    /// fall back to defaults through serde.
    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (env in production, a map in tests)
    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CRABTRADER_API_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = lookup("CRABTRADER_SUGGEST_URL") {
            self.suggestions.endpoint = url;
        }
        if let Some(level) = lookup("CRABTRADER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(template) = lookup("CRABTRADER_TEMPLATE") {
            self.agent.template_name = template;
        }
    }

    pub fn validate(&self) -> Result<()> {
        tracing::debug!("Validating configuration...");

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            );
        }

        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url is empty");
        }

        if self.suggestions.enabled && self.suggestions.endpoint.trim().is_empty() {
            anyhow::bail!("Suggestions are enabled but suggestions.endpoint is empty");
        }

        if self.agent.template_name.trim().is_empty() {
            anyhow::bail!("agent.template_name is empty");
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}

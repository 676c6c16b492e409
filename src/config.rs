use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::recommend::BusinessGoals;

/// Environment variable holding the marketing-data provider key
pub const API_KEY_ENV: &str = "SEOPULSE_API_KEY";
/// Environment variable holding the completion-API key
pub const LLM_KEY_ENV: &str = "SEOPULSE_LLM_KEY";

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Regional database for provider reports
    pub database: Option<String>,

    /// Site-audit project ID
    pub project_id: Option<String>,

    /// Page size for issue-detail pagination
    pub page_size: Option<u64>,

    /// Number of top-ranked issues to show
    pub top: Option<usize>,

    /// Fetch the domain overview report
    pub overview: Option<bool>,

    /// Ask the completion API for recommendations
    pub recommend: Option<bool>,

    /// Output format: text or json
    pub output: Option<String>,

    /// Save report to file
    pub save: Option<String>,

    /// Verbose output
    pub verbose: Option<bool>,

    /// Provider API key; the environment variable takes precedence
    pub api_key: Option<String>,

    /// Completion-API key; the environment variable takes precedence
    pub llm_api_key: Option<String>,

    /// Business questionnaire answers embedded in the recommendation prompt
    pub business_goals: Option<BusinessGoals>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Check current directory first (highest priority)
        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("seopulse.{}", ext)));
            }
        }

        // Check user config directory (~/.config/seopulse)
        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .and_then(|p| {
                if p.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let seopulse_config_dir = config_home.join("seopulse");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(seopulse_config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            target: cli.target.clone(),
            database: if cli.database != "us" {
                cli.database.clone()
            } else {
                self.database.clone().unwrap_or_else(|| cli.database.clone())
            },
            project_id: cli.project_id.clone().or_else(|| self.project_id.clone()),
            issue_id: cli.issue_id,
            page_size: if cli.page_size != 100 {
                cli.page_size
            } else {
                self.page_size.unwrap_or(cli.page_size)
            },
            top: if cli.top != 10 {
                cli.top
            } else {
                self.top.unwrap_or(cli.top)
            },
            overview: if cli.overview {
                cli.overview
            } else {
                self.overview.unwrap_or(cli.overview)
            },
            recommend: if cli.recommend {
                cli.recommend
            } else {
                self.recommend.unwrap_or(cli.recommend)
            },
            output: if cli.output != "text" {
                cli.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| cli.output.clone())
            },
            save: cli.save.clone().or_else(|| self.save.clone()),
            verbose: if cli.verbose {
                cli.verbose
            } else {
                self.verbose.unwrap_or(cli.verbose)
            },
            config: cli.config.clone(),
        }
    }

    /// Provider API key: environment first, config file second
    pub fn provider_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Completion-API key: environment first, config file second
    pub fn llm_api_key(&self) -> Option<String> {
        std::env::var(LLM_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.llm_api_key.clone())
    }
}

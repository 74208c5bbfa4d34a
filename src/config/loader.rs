//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (`$XDG_CONFIG_HOME/autodocs/config.toml`)
//! 3. Project config (`.autodocs/config.toml`)
//! 4. Environment variables (`AUTODOCS_<SECTION>_<KEY>`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{AutodocError, Result};

const ENV_PREFIX: &str = "AUTODOCS_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Resolve the chain from explicit file locations; missing files are skipped.
    pub fn load_layers(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // AUTODOCS_LLM_MAX_TOKENS -> llm.max_tokens: only the first `_` nests.
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replacen('_', ".", 1).into()),
        );

        let config: Config = figment
            .extract()
            .map_err(|e| AutodocError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| AutodocError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/autodocs/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("autodocs"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".autodocs")
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a commented default config. Existing files are kept unless `force`.
    pub fn init_at(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(false);
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, Self::default_config_template())?;
        info!("Created config: {}", path.display());
        Ok(true)
    }

    /// Initialize global or project configuration, returning the file path.
    pub fn init(global: bool, force: bool) -> Result<(PathBuf, bool)> {
        let path = if global {
            Self::global_config_path().ok_or_else(|| {
                AutodocError::Config("Cannot determine global config directory".to_string())
            })?
        } else {
            Self::project_config_path()
        };
        let created = Self::init_at(&path, force)?;
        Ok((path, created))
    }

    /// Render a config as TOML or JSON.
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| AutodocError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn default_config_template() -> &'static str {
        r#"# autodocs configuration
# Global: ~/.config/autodocs/config.toml, project: .autodocs/config.toml
# Environment overrides: AUTODOCS_<SECTION>_<KEY>, e.g. AUTODOCS_LLM_MODEL

[llm]
# "openai" talks to any OpenAI-compatible endpoint (OpenRouter by default)
provider = "openai"
model = "mistralai/mistral-7b-instruct"
# api_base = "https://openrouter.ai/api/v1"
# API key: OPENROUTER_API_KEY or OPENAI_API_KEY
timeout_secs = 120
temperature = 0.4
max_tokens = 1024
max_retries = 2

[analysis]
exclude = []
max_file_size = 1048576
# Truncate source in prompts (0 = send whole file)
max_code_chars = 0

[export]
output_dir = "docs"
markdown_file = "auto_docs.md"
pdf_prefix = "auto_docs"

[run]
# Files documented at once; report order is unaffected
concurrency = 1
"#
    }
}

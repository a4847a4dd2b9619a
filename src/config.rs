//! Configuration management for kronos-dashboard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    API_URL_ENV, APP_DIR_NAME, CONFIG_GENERATED, DEFAULT_API_URL, DEFAULT_DATE_FORMAT, DEFAULT_DIALOG_CLEAR_DELAY_MS,
    DEFAULT_FORM_RESET_DELAY_MS, DEFAULT_LIST_DATE_FORMAT, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    LOCAL_CONFIG_FILE, MAX_DIALOG_DELAY_MS, MAX_REFRESH_INTERVAL_SECS, MAX_REQUEST_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub dialog: DialogConfig,
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Kronos API, e.g. "http://localhost:9175/api/v1"
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Confirmation dialog timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// How long a closed dialog keeps its content while hiding, in milliseconds
    pub clear_delay_ms: u64,
    /// Delay before the create form is cleared after the dialog closes, in milliseconds
    pub form_reset_delay_ms: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Auto-refresh interval for the schedule list in seconds (0 = manual only)
    pub refresh_interval_secs: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for the details dialog
    pub date_format: String,
    /// Date format for the schedule table
    pub list_date_format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file in addition to the in-app log view
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            clear_delay_ms: DEFAULT_DIALOG_CLEAR_DELAY_MS,
            form_reset_delay_ms: DEFAULT_FORM_RESET_DELAY_MS,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            list_date_format: DEFAULT_LIST_DATE_FORMAT.to_string(),
        }
    }
}

impl DialogConfig {
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }

    pub fn form_reset_delay(&self) -> Duration {
        Duration::from_millis(self.form_reset_delay_ms)
    }
}

impl Config {
    /// Load configuration from file or return defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url_override(&url)?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Replace the API base URL, e.g. from `KRONOS_API_URL`
    pub fn apply_api_url_override(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(());
        }
        self.api.base_url = url.to_string();
        self.validate()
            .with_context(|| format!("Invalid {} value", API_URL_ENV))
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url cannot be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("api.base_url must start with http:// or https://, got '{}'", base_url);
        }

        if self.api.request_timeout_secs == 0 || self.api.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            anyhow::bail!(
                "api.request_timeout_secs must be between 1 and {}, got {}",
                MAX_REQUEST_TIMEOUT_SECS,
                self.api.request_timeout_secs
            );
        }

        if self.dialog.clear_delay_ms > MAX_DIALOG_DELAY_MS {
            anyhow::bail!("dialog.clear_delay_ms cannot exceed {}", MAX_DIALOG_DELAY_MS);
        }
        if self.dialog.form_reset_delay_ms > MAX_DIALOG_DELAY_MS {
            anyhow::bail!("dialog.form_reset_delay_ms cannot exceed {}", MAX_DIALOG_DELAY_MS);
        }

        if self.ui.refresh_interval_secs > MAX_REFRESH_INTERVAL_SECS {
            anyhow::bail!("ui.refresh_interval_secs cannot exceed {} (1 hour)", MAX_REFRESH_INTERVAL_SECS);
        }

        Self::validate_date_format("date_format", &self.display.date_format)?;
        Self::validate_date_format("list_date_format", &self.display.list_date_format)?;

        Ok(())
    }

    fn validate_date_format(name: &str, format: &str) -> Result<()> {
        use chrono::format::{Item, StrftimeItems};

        if format.trim().is_empty() {
            anyhow::bail!("display.{} cannot be empty", name);
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            anyhow::bail!("Invalid display.{} '{}'", name, format);
        }
        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# kronos-dashboard Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}

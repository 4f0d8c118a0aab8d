//! Configuration management for the docs navigator.
//!
//! Parses `rd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! default_slug = "introduction"
//! fallback_section = "getting-started"
//! anchor_param = "section"
//! content = "docs.yaml"
//!
//! [scroll]
//! mount_delay_ms = 100
//! select_delay_ms = 50
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the landing page slug.
    pub default_slug: Option<String>,
    /// Override the content file.
    pub content_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rd.toml";

/// Upper bound for scroll deferral delays.
const MAX_DELAY_MS: u64 = 10_000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (content path is a relative string from TOML).
    docs: DocsConfigRaw,
    /// Scroll deferral configuration.
    pub scroll: ScrollConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    default_slug: Option<String>,
    fallback_section: Option<String>,
    anchor_param: Option<String>,
    content: Option<String>,
}

/// Resolved documentation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Page shown when the URL selects nothing valid.
    pub default_slug: String,
    /// Section key used for slugs that belong to no section.
    pub fallback_section: String,
    /// Reserved query key carrying the in-page anchor.
    pub anchor_param: String,
    /// External content file. `None` uses the built-in content.
    pub content_path: Option<PathBuf>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            default_slug: "introduction".to_owned(),
            fallback_section: "getting-started".to_owned(),
            anchor_param: "section".to_owned(),
            content_path: None,
        }
    }
}

/// Scroll deferral configuration.
///
/// Content mounts asynchronously after a page switch, so scrolls to an
/// anchor are deferred by a short fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Delay before scrolling to the anchor found in the initial URL.
    pub mount_delay_ms: u64,
    /// Delay before scrolling to an anchor after selecting another page.
    pub select_delay_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mount_delay_ms: 100,
            select_delay_ms: 50,
        }
    }
}

impl ScrollConfig {
    /// Initial mount delay as a [`Duration`].
    #[must_use]
    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }

    /// Page selection delay as a [`Duration`].
    #[must_use]
    pub fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a delay to stay within [`MAX_DELAY_MS`].
fn require_delay(value: u64, field: &str) -> Result<(), ConfigError> {
    if value > MAX_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "{field} cannot exceed {MAX_DELAY_MS}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rd.toml` in current directory and parents.
    /// Without any file the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(slug) = &settings.default_slug {
            self.docs_resolved.default_slug.clone_from(slug);
        }
        if let Some(path) = &settings.content_path {
            self.docs_resolved.content_path = Some(path.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        require_non_empty(&docs.default_slug, "docs.default_slug")?;
        require_non_empty(&docs.fallback_section, "docs.fallback_section")?;
        require_non_empty(&docs.anchor_param, "docs.anchor_param")?;
        require_delay(self.scroll.mount_delay_ms, "scroll.mount_delay_ms")?;
        require_delay(self.scroll.select_delay_ms, "scroll.select_delay_ms")?;
        Ok(())
    }

    /// Fill the resolved docs configuration, joining the content path
    /// onto the config file directory.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = DocsConfig::default();
        let raw = &self.docs;

        self.docs_resolved = DocsConfig {
            default_slug: raw.default_slug.clone().unwrap_or(defaults.default_slug),
            fallback_section: raw
                .fallback_section
                .clone()
                .unwrap_or(defaults.fallback_section),
            anchor_param: raw.anchor_param.clone().unwrap_or(defaults.anchor_param),
            content_path: raw.content.as_deref().map(|p| config_dir.join(p)),
        };
    }
}

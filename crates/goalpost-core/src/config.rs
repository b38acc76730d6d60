//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `goalpost-config.yaml`. Every
//! section is optional and falls back to defaults, so an empty file (or no
//! file at all) yields a permissive campaign starting on turn 1 with the
//! built-in goal templates.
//!
//! Sections not described here (such as the host's `host` section) are
//! ignored by this loader.

use std::collections::BTreeMap;
use std::path::Path;

use goalpost_types::GoalTemplate;
use serde::Deserialize;

use crate::catalog::GoalTemplateCatalog;
use crate::clock::DEFAULT_STARTING_TURN;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "GOALPOST_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Turn counter and validation settings.
    #[serde(default)]
    pub campaign: CampaignConfig,

    /// Goal presets. Empty means "use the built-in catalog".
    #[serde(default)]
    pub templates: BTreeMap<String, GoalTemplate>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from `path`, or use defaults if no file exists
    /// there. The `GOALPOST_LOG` override applies either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// The `GOALPOST_LOG` environment variable overrides `logging.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            let mut config = Self::default();
            config.logging.apply_env_overrides();
            return Ok(config);
        }
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Build the template catalog this configuration describes.
    pub fn catalog(&self) -> GoalTemplateCatalog {
        if self.templates.is_empty() {
            GoalTemplateCatalog::builtin()
        } else {
            GoalTemplateCatalog::from_templates(self.templates.clone())
        }
    }
}

/// Campaign-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CampaignConfig {
    /// Turn number the clock starts on (and returns to on a new campaign).
    #[serde(default = "default_starting_turn")]
    pub starting_turn: u64,

    /// Reject goals with a non-positive target or turn budget.
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            starting_turn: default_starting_turn(),
            strict_validation: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    fn apply_env_overrides(&mut self) {
        self.apply_level_override(std::env::var(LOG_LEVEL_ENV).ok());
    }

    fn apply_level_override(&mut self, level: Option<String>) {
        if let Some(level) = level.filter(|level| !level.trim().is_empty()) {
            self.level = level;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

const fn default_starting_turn() -> u64 {
    DEFAULT_STARTING_TURN
}

fn default_log_level() -> String {
    "info".to_owned()
}

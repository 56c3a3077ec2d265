//! Settings for the feed pipeline, read from ~/.config/alarmfeed/config.toml.
//!
//! Without a file the canonical rules and the default feed URL apply. Keys
//! outside `feed_url`, `variant` and `[rules]` are ignored with a warning.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::classify::{ClassifierRules, PriorityKeyword, TypeRule, Variant};
use crate::feed::DEFAULT_FEED_URL;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid feed_url '{url}': {reason}")]
    InvalidFeedUrl { url: String, reason: String },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed endpoint to fetch.
    pub feed_url: String,

    /// Rule preset to start from.
    pub variant: Variant,

    /// Per-rule overrides applied on top of the preset.
    pub rules: RuleOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            variant: Variant::default(),
            rules: RuleOverrides::default(),
        }
    }
}

/// Optional replacements for individual [`ClassifierRules`] fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub accessibility_label: Option<bool>,
    pub normalize_date: Option<bool>,
    pub fold_title_case: Option<bool>,
    pub fold_description_case: Option<bool>,
    pub priority_keywords: Option<Vec<PriorityKeyword>>,
    pub type_rules: Option<Vec<TypeRule>>,
}

impl RuleOverrides {
    /// Applies every set override to `rules`.
    pub fn apply(&self, mut rules: ClassifierRules) -> ClassifierRules {
        if let Some(v) = self.accessibility_label {
            rules.accessibility_label = v;
        }
        if let Some(v) = self.normalize_date {
            rules.normalize_date = v;
        }
        if let Some(v) = self.fold_title_case {
            rules.fold_title_case = v;
        }
        if let Some(v) = self.fold_description_case {
            rules.fold_description_case = v;
        }
        if let Some(keywords) = &self.priority_keywords {
            rules.priority_keywords = keywords.clone();
        }
        if let Some(type_rules) = &self.type_rules {
            rules.type_rules = type_rules.clone();
        }
        rules
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 3] = ["feed_url", "variant", "rules"];

    /// Reads the config at `path`.
    ///
    /// An absent or blank file gives the defaults. Files over one megabyte are
    /// refused before reading. Parsing and URL checks follow [`Config::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            // Removed after the size check
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file gone before read, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        tracing::info!(
            feed_url = %config.feed_url,
            variant = ?config.variant,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Checks that `feed_url` is an absolute http(s) URL.
    ///
    /// [`Config::from_toml`] runs this already; call it again after changing
    /// `feed_url` by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidFeedUrl {
            url: self.feed_url.clone(),
            reason,
        };
        let url = url::Url::parse(&self.feed_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(format!(
                "unsupported scheme {} (only http/https allowed)",
                scheme
            ))),
        }
    }

    /// Effective classifier rules: the variant preset with overrides applied.
    pub fn rules(&self) -> ClassifierRules {
        self.rules.apply(self.variant.rules())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Construction-time configuration
//!
//! Deployments describe their language setup and pass-through engine settings
//! in one structure, typically kept as JSON:
//!
//! ```json
//! {
//!     "allowed_languages": ["en", "de"],
//!     "default_language": "en",
//!     "locales_dir": "locales",
//!     "engine": {
//!         "template_dir": "templates",
//!         "compile_dir": "templates_c",
//!         "cache_dir": "cache",
//!         "caching": true,
//!         "cache_lifetime_secs": 3600
//!     }
//! }
//! ```
//!
//! Everything under `engine` is forwarded unchanged to the host engine.

use crate::engine::EngineSettings;
use crate::error::{I18nError, I18nResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory used when a deployment configures no locales directory
pub const DEFAULT_LOCALES_DIR: &str = "locales";

/// Full configuration surface consumed at construction.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TemplateConfig {
    /// The fixed set of language codes this deployment supports
    pub allowed_languages: Vec<String>,
    /// Must be a member of `allowed_languages`
    pub default_language: String,
    /// Initial active language; `None` means the default
    #[serde(default)]
    pub language: Option<String>,
    /// Directory holding `<language>.txt` files; `None` means
    /// [`DEFAULT_LOCALES_DIR`]
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,
    /// Pass-through host engine settings
    #[serde(default)]
    pub engine: EngineSettings,
}

impl TemplateConfig {
    /// Minimal configuration: a language set, its default, and defaults for
    /// the rest.
    pub fn new(allowed_languages: &[&str], default_language: &str) -> Self {
        TemplateConfig {
            allowed_languages: allowed_languages
                .iter()
                .map(|code| code.to_string())
                .collect(),
            default_language: default_language.to_string(),
            language: None,
            locales_dir: None,
            engine: EngineSettings::default(),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_locales_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locales_dir = Some(dir.into());
        self
    }

    pub fn with_engine_settings(mut self, settings: EngineSettings) -> Self {
        self.engine = settings;
        self
    }

    /// The configured locales directory, or the conventional default.
    pub fn locales_dir(&self) -> PathBuf {
        self.locales_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALES_DIR))
    }

    /// Load a configuration from a JSON file
    ///
    /// # Errors
    /// * [`I18nError::ConfigError`] - File unreadable or JSON malformed
    pub fn from_json_file(path: &Path) -> I18nResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| I18nError::ConfigError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| I18nError::ConfigError(format!("{}: {}", path.display(), e)))
    }
}

//! Deployment configuration
//!
//! Settings that belong to whoever hosts the widget rather than to the page
//! embedding it. Loaded from TOML at startup, falls back to defaults if no
//! config file exists.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level cookiebar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CookiebarConfig {
    /// How the visitor's jurisdiction is determined.
    pub jurisdiction: JurisdictionConfig,
    /// Banner language selection.
    pub language: LanguageConfig,
    /// Where the CLI keeps its cookie jar.
    pub store: StoreConfig,
}

/// Jurisdiction detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JurisdictionMode {
    /// Skip the lookup and treat every new visitor as needing a prompt.
    AssumeEu,
    /// Ask the geolocation endpoint for the visitor's country.
    Lookup,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JurisdictionConfig {
    pub mode: JurisdictionMode,
    /// Geolocation endpoint returning JSON with a `country_code` field.
    pub endpoint: String,
    /// Lookup deadline in milliseconds. Past it the visitor is prompted.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Always use this language instead of negotiating from the locale.
    pub fixed: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

// ============================================================
// Defaults
// ============================================================

impl Default for JurisdictionConfig {
    fn default() -> Self {
        Self {
            mode: JurisdictionMode::AssumeEu,
            endpoint: "https://freegeoip.app/json/".into(),
            timeout_ms: 1500,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".cookiebar/jar.json"),
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl CookiebarConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {} - using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl JurisdictionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

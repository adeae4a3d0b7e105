//! Client configuration at `~/.stine/config.toml`.
//!
//! Provides the default username, the session file location, and portal
//! endpoint overrides. CLI flags always override config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stine_core::PortalConfig;
use tracing::debug;

/// Top-level config file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account settings.
    #[serde(default)]
    pub account: AccountConfig,

    /// Portal endpoint settings.
    #[serde(default)]
    pub portal: PortalConfig,
}

/// Account settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Default username (empty = ask).
    #[serde(default)]
    pub username: String,

    /// Where the session is saved between runs.
    #[serde(default)]
    pub session_file: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file, returning defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The configured username, if any.
    pub fn username(&self) -> Option<&str> {
        let name = self.account.username.trim();
        (!name.is_empty()).then_some(name)
    }
}

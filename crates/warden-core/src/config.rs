use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Warden policy-automation subsystem.
///
/// Loaded from a TOML file. Each section corresponds to a bounded concern;
/// missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub queue: QueueConfig,
}

impl WardenConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WardenConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default tracing filter: trace, debug, info, warn, error.
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
        }
    }
}

/// Declarative seed sources for the action-definition catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Tabular catalog of built-in action definitions (name,description rows).
    pub catalog_path: PathBuf,
    /// Directory of operator scripts exposed as script actions.
    pub script_dir: PathBuf,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("config/actions.csv"),
            script_dir: PathBuf::from("scripts"),
        }
    }
}

/// Durable work queue addressing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Server role that consumes deferred policy-action work.
    pub role: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            role: "automate".to_string(),
        }
    }
}

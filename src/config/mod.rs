pub mod settings;

pub use settings::{Config, DebugLogRotation, ProviderKind, ProviderSettings};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("coach-potato");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&config_dir)
        .context("Failed to create config directory")?;

    Ok(config_dir.join("config.toml"))
}

/// Configuration read (or freshly written) by [`load_or_create_config_at`]
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// The file did not exist and was written with defaults
    pub created: bool,
}

/// Load configuration from `path`, writing the defaults there if it does not exist
pub fn load_or_create_config_at(path: &Path) -> Result<LoadedConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(LoadedConfig {
            config,
            created: false,
        })
    } else {
        let config = Config::default();
        save_config_at(&config, path)?;
        Ok(LoadedConfig {
            config,
            created: true,
        })
    }
}

pub fn save_config_at(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;
    fs::write(path, content)
        .context("Failed to write config file")?;
    Ok(())
}

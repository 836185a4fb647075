use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::directory::FetchOptions;

/// Global configuration loaded from `~/.config/cdm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdmConfig {
    /// Concurrent download workers per content session.
    pub max_workers: usize,
    /// Seconds to wait for anonymous credential establishment during a
    /// directory fetch.
    pub credential_timeout_secs: u64,
    /// Server directory endpoint. Required unless an accelerator is set.
    #[serde(default)]
    pub directory_url: Option<String>,
    /// Local cache accelerator host. When set, the directory is never
    /// queried and all content is fetched from this one host.
    #[serde(default)]
    pub accelerator_host: Option<String>,
}

impl Default for CdmConfig {
    fn default() -> Self {
        Self {
            max_workers: 8,
            credential_timeout_secs: 20,
            directory_url: None,
            accelerator_host: None,
        }
    }
}

impl CdmConfig {
    /// Directory fetch knobs derived from this config.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            accelerator_host: self.accelerator_host.clone(),
            credential_timeout: Duration::from_secs(self.credential_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CdmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CdmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CdmConfig = toml::from_str(&data)?;
    Ok(cfg)
}

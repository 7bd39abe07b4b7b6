use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::download::DEFAULT_FOLDER;

/// HTTP timeouts for the curl-backed primitives (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds for intercepted API calls.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/tvd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvdConfig {
    /// Folder (relative to the working directory) that downloads land in.
    pub download_folder: String,
    /// API path substrings intercepted in addition to the built-in allowlist.
    #[serde(default)]
    pub extra_intercept_patterns: Vec<String>,
    /// Optional HTTP timeouts; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for TvdConfig {
    fn default() -> Self {
        Self {
            download_folder: DEFAULT_FOLDER.to_string(),
            extra_intercept_patterns: Vec::new(),
            http: None,
        }
    }
}

impl TvdConfig {
    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tvd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TvdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TvdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: TvdConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

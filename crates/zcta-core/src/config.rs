use crate::download::{default_user_agent, HttpOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Census TIGER/Line 2019 ZCTA5 boundary bundle.
pub const DEFAULT_SOURCE_URL: &str =
    "https://www2.census.gov/geo/tiger/TIGER2019/ZCTA5/tl_2019_us_zcta510.zip";

/// Relative to the working directory.
pub const DEFAULT_TARGET_DIR: &str = "../data/tl_2019_us_zcta510";

/// Transfer limits (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Hard limit for the whole transfer; omit for no limit.
    pub timeout_secs: Option<u64>,
    /// Abort if throughput stays below this many bytes/s for `low_speed_time_secs`.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    /// Refuse archives larger than this (None = no cap).
    pub max_body_bytes: Option<u64>,
    /// Overrides the default `zcta-fetch/<version>` user agent.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: Some(3600),
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            max_body_bytes: None,
            user_agent: None,
        }
    }
}

impl From<&HttpConfig> for HttpOptions {
    fn from(cfg: &HttpConfig) -> Self {
        HttpOptions {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            max_body_bytes: cfg.max_body_bytes,
            user_agent: cfg.user_agent.clone().unwrap_or_else(default_user_agent),
        }
    }
}

/// Global configuration loaded from `~/.config/zcta/config.toml`.
/// Every key is optional; missing keys take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZctaConfig {
    /// URL of the ZIP archive to fetch.
    pub source_url: String,
    /// Directory to extract into; its existence means "already fetched".
    pub target_dir: PathBuf,
    pub http: HttpConfig,
}

impl Default for ZctaConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            http: HttpConfig::default(),
        }
    }
}

impl ZctaConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions::from(&self.http)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("zcta")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ZctaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ZctaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file, which must exist.
pub fn load_from(path: &Path) -> Result<ZctaConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ZctaConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

//! Configuration loading for the API server.
//!
//! Precedence: command-line flag, then `ASSET_VIZ_ADDR` (address only), then
//! the TOML config file, then built-in defaults.

use anyhow::{Context, Result};
use blender_bridge::BlenderRunner;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub server: Option<ServerConfig>,
    pub blender: Option<BlenderConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServerConfig {
    pub addr: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub max_upload_mb: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BlenderConfig {
    pub binary: Option<PathBuf>,
    pub enabled: Option<bool>,
    pub extra_args: Option<Vec<String>>,
}

/// Default bind address
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Default static asset directory (models live in `<static_dir>/models`)
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default upload cap in MB
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 100;

/// Default Blender executable, looked up on `PATH`
pub const DEFAULT_BLENDER: &str = "blender";

/// Environment variable overriding the bind address
pub const ADDR_ENV: &str = "ASSET_VIZ_ADDR";

impl Config {
    pub fn addr(&self) -> Option<String> {
        self.server.as_ref().and_then(|s| s.addr.clone())
    }

    pub fn static_dir(&self) -> PathBuf {
        self.server
            .as_ref()
            .and_then(|s| s.static_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }

    /// Get the upload cap in bytes.
    /// Returns configured value or default (100MB).
    pub fn max_upload_bytes(&self) -> u64 {
        self.server
            .as_ref()
            .and_then(|s| s.max_upload_mb)
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
            .saturating_mul(1024 * 1024)
    }

    pub fn blender_binary(&self) -> PathBuf {
        self.blender
            .as_ref()
            .and_then(|b| b.binary.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BLENDER))
    }

    pub fn conversion_enabled(&self) -> bool {
        self.blender
            .as_ref()
            .and_then(|b| b.enabled)
            .unwrap_or(true)
    }

    pub fn blender_extra_args(&self) -> Vec<String> {
        self.blender
            .as_ref()
            .and_then(|b| b.extra_args.clone())
            .unwrap_or_default()
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "asset-viz")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}

/// Command-line values that take priority over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub addr: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub blender: Option<PathBuf>,
    pub no_convert: bool,
}

/// Fully resolved server settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: String,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// `None` when conversion is disabled
    pub blender: Option<BlenderRunner>,
}

impl Settings {
    pub fn resolve(config: &Config, overrides: Overrides, env_addr: Option<String>) -> Self {
        let addr = overrides
            .addr
            .or(env_addr)
            .or_else(|| config.addr())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let static_dir = overrides
            .static_dir
            .unwrap_or_else(|| config.static_dir());

        let blender = if overrides.no_convert || !config.conversion_enabled() {
            None
        } else {
            let binary = overrides
                .blender
                .unwrap_or_else(|| config.blender_binary());
            Some(BlenderRunner::new(binary).with_extra_args(config.blender_extra_args()))
        };

        Self {
            addr,
            static_dir,
            max_upload_bytes: usize::try_from(config.max_upload_bytes()).unwrap_or(usize::MAX),
            blender,
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        self.static_dir.join("models")
    }
}

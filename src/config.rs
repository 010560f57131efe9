//! JSON configuration file.
//!
//! Stores settings in `experience.json` (working directory by default,
//! overridable through `EXPERIENCE_CONFIG` or an explicit path).
//!
//! A missing file is not an error: defaults are used. A file that exists
//! but cannot be read or parsed is reported, as is an invalid manifest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::constants::*;
use crate::model::sources::{default_sources, validate_manifest, ManifestError, Source};

/// Serializable settings for one experience.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Enables debug panels and verbose logging.
    pub debug: bool,
    /// Cap applied to the device pixel ratio.
    pub max_pixel_ratio: f64,
    /// Assets to load before the world is built.
    pub sources: Vec<Source>,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            sources: default_sources(),
        }
    }
}

impl ExperienceConfig {
    /// Checks the manifest and resets an unusable pixel ratio cap.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio >= 1.0) {
            warn!(
                max_pixel_ratio = self.max_pixel_ratio,
                "invalid max_pixel_ratio, using default"
            );
            self.max_pixel_ratio = MAX_PIXEL_RATIO;
        }
        validate_manifest(&self.sources)?;
        Ok(())
    }

    /// Turn debug mode on when the location hash is `#debug`.
    pub fn with_debug_hash(mut self, hash: &str) -> Self {
        if is_debug_hash(hash) {
            self.debug = true;
        }
        self
    }

    /// Default log directive: verbose in debug mode.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            DEBUG_LOG_FILTER
        } else {
            LOG_FILTER
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write config {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(serde_json::Error),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] ManifestError),
}

/// Returns true for the `#debug` location hash.
pub fn is_debug_hash(hash: &str) -> bool {
    hash.trim() == DEBUG_HASH
}

/// Config file path: explicit argument, then `EXPERIENCE_CONFIG`, then
/// `experience.json`.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    pick_path(explicit, std::env::var(CONFIG_PATH_ENV).ok())
}

fn pick_path(explicit: Option<&str>, from_env: Option<String>) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .or_else(|| from_env.filter(|p| !p.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Load and validate the config at `path`, using defaults if it is absent.
pub fn load_config(path: &Path) -> Result<ExperienceConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ExperienceConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut config: ExperienceConfig =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;

    info!(
        path = %path.display(),
        sources = config.sources.len(),
        debug = config.debug,
        "config loaded"
    );
    Ok(config)
}

/// Write `config` as pretty JSON, creating parent directories as needed.
pub fn save_config(path: &Path, config: &ExperienceConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "config saved");
    Ok(())
}

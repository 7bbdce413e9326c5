//! Application configuration.
//!
//! Read once at startup from a TOML file. Every field has a default, so a
//! missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::LocaleId;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "CADET_MISSION_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cadet-mission.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locale: LocaleId,
    /// Shown on the school gate in the farewell picture.
    pub school_name: String,
    /// Overrides the platform data directory for the saved profile.
    pub storage_dir: Option<PathBuf>,
    pub portrait: PortraitConfig,
    pub visuals: VisualConfig,
    pub audio: AudioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: LocaleId::Catalan,
            school_name: "Col·legi Max Aub".to_string(),
            storage_dir: None,
            portrait: PortraitConfig::default(),
            visuals: VisualConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

/// Image-generation endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortraitConfig {
    /// Base URL; the model and `:generateContent` are appended.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Scene appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub star_count: usize,
    pub sparkle_count: usize,
    pub show_orbit_paths: bool,
    /// Width of the body textures in pixels, clamped to 8..=4096.
    pub texture_size: u32,
    pub texture_seed: u64,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            star_count: 5000,
            sparkle_count: 500,
            show_orbit_paths: true,
            texture_size: 512,
            texture_seed: 7,
        }
    }
}

/// Sound settings. Paths are relative to the Bevy asset folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub ambient_path: String,
    pub ambient_volume: f32,
    pub engine_path: String,
    pub countdown_path: String,
    pub effects_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ambient_path: "audio/ambient.ogg".to_string(),
            ambient_volume: 0.3,
            engine_path: "audio/engine.ogg".to_string(),
            countdown_path: "audio/countdown.ogg".to_string(),
            effects_volume: 0.5,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(path, &content).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from `path`, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Config file to use: `$CADET_MISSION_CONFIG` or `./cadet-mission.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

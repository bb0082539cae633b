//! Optional `roundtrip.toml` settings for the round-trip harness
//!
//! Every key is optional; command-line flags take precedence over values
//! read from the file.

use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Filename looked up in the working directory when no path is given
pub const SETTINGS_FILENAME: &str = "roundtrip.toml";

/// Settings read from `roundtrip.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoundtripSettings {
    /// Directory holding `<asset>/<variant>/<file>` sources
    pub source: Option<PathBuf>,
    /// Directory transformed files are written to
    pub target: Option<PathBuf>,
    /// Manifest path, defaults to `<target>/model-index.json`
    pub manifest: Option<PathBuf>,
    /// Variant names to include
    pub variants: Option<Vec<String>>,
    /// Transform command: program followed by leading arguments
    pub command: Option<Vec<String>>,
}

impl RoundtripSettings {
    /// Load settings from `path`. Returns Ok(None) if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: RoundtripSettings =
            toml::from_str(&contents).map_err(|e| SettingsError::ParseToml {
                path: path.to_path_buf(),
                source: e,
            })?;
        info!("Loaded settings from {:?}", path);
        Ok(Some(settings))
    }

    /// Load `roundtrip.toml` from `dir`, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, SettingsError> {
        Self::load(&dir.join(SETTINGS_FILENAME))
    }
}

/// Errors that can occur while reading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\spotgrab\config.toml
//! - macOS: ~/Library/Application Support/spotgrab/config.toml
//! - Linux: ~/.config/spotgrab/config.toml
//!
//! The config file is human-readable and editable. Settings are loaded at
//! startup; command-line flags override anything set here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::convert::AudioFormat;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where downloads land and how they are encoded
    pub output: OutputConfig,

    /// Search behavior
    pub search: SearchConfig,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for songs
    pub root: PathBuf,

    /// Root directory for podcast episodes
    pub root_podcast: PathBuf,

    /// Target audio format: "ogg", "mp3" or "flac"
    pub format: AudioFormat,

    /// Re-download files that already exist on disk
    pub force: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: home.join("spotgrab").join("songs"),
            root_podcast: home.join("spotgrab").join("podcasts"),
            format: AudioFormat::Mp3,
            force: false,
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results shown per category
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spotgrab"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Get the cache directory path (session credentials live here)
pub fn cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("spotgrab"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[search]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.output.root = PathBuf::from("/music/downloads");
        config.output.format = AudioFormat::Flac;
        config.output.force = true;
        config.search.limit = 25;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.output.root, PathBuf::from("/music/downloads"));
        assert_eq!(parsed.output.format, AudioFormat::Flac);
        assert!(parsed.output.force);
        assert_eq!(parsed.search.limit, 25);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[search]
limit = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.search.limit, 5);

        // Other fields use defaults
        assert_eq!(config.output.format, AudioFormat::Mp3);
        assert!(!config.output.force);
        assert!(config.output.root.ends_with("songs"));
    }
}

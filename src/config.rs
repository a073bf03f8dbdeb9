//! Application configuration.
//!
//! Read from `<config_dir>/drowsii/config.json`. Every field is optional in
//! the file; missing fields take the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Duration;
use tracing::debug;

use crate::recommendation::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::sound::{AssetResolver, ToneSynth};
use crate::store::{SettingsStore, StoreError};
use crate::types::DEFAULT_VOLUME;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is invalid: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(std::env::temp_dir).join("drowsii")
}

fn default_custom_sounds_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("drowsii").join("Sounds"))
}

fn default_tone_cache_dir() -> PathBuf {
    app_dir(dirs::cache_dir()).join("tones")
}

fn default_settings_path() -> Option<PathBuf> {
    SettingsStore::default_path()
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_backoff_ms() -> u64 {
    1000
}

/// Retry settings for recommendation requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.backoff_ms))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory holding the bundled sound files.
    #[serde(default)]
    pub bundled_sounds_dir: Option<PathBuf>,

    /// Directory where users drop their own sound files.
    #[serde(default = "default_custom_sounds_dir")]
    pub custom_sounds_dir: Option<PathBuf>,

    /// Where synthesized fallback tones are written.
    #[serde(default = "default_tone_cache_dir")]
    pub tone_cache_dir: PathBuf,

    /// Settings file; `None` keeps settings in memory only.
    #[serde(default = "default_settings_path")]
    pub settings_path: Option<PathBuf>,

    /// Volume for sounds without an explicit level.
    #[serde(default = "default_volume")]
    pub default_volume: f32,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bundled_sounds_dir: None,
            custom_sounds_dir: default_custom_sounds_dir(),
            tone_cache_dir: default_tone_cache_dir(),
            settings_path: default_settings_path(),
            default_volume: default_volume(),
            retry: RetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default location: `<config_dir>/drowsii/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("drowsii").join("config.json"))
    }

    /// Loads and validates the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        debug!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, else the default file if it exists, else the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a config file exists but is invalid.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.default_volume) {
            return Err(ConfigError::Invalid(format!(
                "default_volume must be between 0 and 1, got {}",
                self.default_volume
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.tone_cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "tone_cache_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the asset resolver for these directories.
    pub fn resolver(&self) -> AssetResolver {
        AssetResolver::new(
            self.bundled_sounds_dir.clone(),
            self.custom_sounds_dir.clone(),
            ToneSynth::new(&self.tone_cache_dir),
        )
    }

    /// Opens the settings store, or an in-memory one if no path is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the settings file exists but is unreadable.
    pub fn settings_store(&self) -> Result<SettingsStore, StoreError> {
        match &self.settings_path {
            Some(path) => SettingsStore::open(path),
            None => Ok(SettingsStore::in_memory()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bundled_sounds_dir, None);
        assert_eq!(config.default_volume, 0.5);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_ms, 1000);
        assert!(config.tone_cache_dir.ends_with("drowsii/tones"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"bundled_sounds_dir": "/opt/drowsii"}"#);

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.bundled_sounds_dir, Some(PathBuf::from("/opt/drowsii")));
        assert_eq!(config.default_volume, 0.5);
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut config = AppConfig::default();
        config.default_volume = 0.25;
        config.retry.max_attempts = 5;
        config.settings_path = None;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let dir = TempDir::new().unwrap();

        let path = write_config(&dir, r#"{"default_volume": 1.5}"#);
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid(msg)) if msg.contains("default_volume")
        ));

        let path = write_config(&dir, r#"{"retry": {"max_attempts": 0}}"#);
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid(msg)) if msg.contains("max_attempts")
        ));
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            AppConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));

        let path = write_config(&dir, "{ nope");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let retry = RetryConfig {
            max_attempts: 4,
            backoff_ms: 250,
        };
        assert_eq!(
            retry.policy(),
            RetryPolicy::new(4, Duration::from_millis(250))
        );
    }

    #[test]
    fn test_in_memory_store_without_path() {
        let config = AppConfig {
            settings_path: None,
            ..AppConfig::default()
        };
        let store = config.settings_store().unwrap();
        assert_eq!(store.path(), None);
    }

    #[test]
    fn test_resolver_uses_tone_cache_dir() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            bundled_sounds_dir: None,
            custom_sounds_dir: None,
            tone_cache_dir: dir.path().join("tones"),
            ..AppConfig::default()
        };

        let source = config.resolver().resolve(crate::catalog::Sound::Fan).unwrap();
        assert!(source.is_tone());
        assert!(source.path().starts_with(dir.path().join("tones")));
    }
}

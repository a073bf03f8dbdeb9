//! Persisted user settings.
//!
//! A small JSON document holding quiz progress and the cached
//! recommendation. Every change is written through to disk; a store opened
//! with `in_memory` keeps everything in the process.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::recommendation::RecommendationResponse;

/// File name of the settings document.
pub const SETTINGS_FILE: &str = "settings.json";

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access settings file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {} is invalid: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The on-disk settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsData {
    #[serde(default)]
    pub has_completed_quiz: bool,
    #[serde(default)]
    pub quiz_answers: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_quiz_answers_hash: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_recommendation: Option<RecommendationResponse>,
}

/// Shared settings with write-through persistence.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: Mutex<SettingsData>,
}

impl SettingsStore {
    /// Creates a store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(SettingsData::default()),
        }
    }

    /// Opens the store at `path`. A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            SettingsData::default()
        };

        debug!("Settings loaded from {}", path.display());
        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    /// Default location: `<data_dir>/drowsii/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("drowsii").join(SETTINGS_FILE))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns a copy of the current settings.
    pub fn snapshot(&self) -> SettingsData {
        self.lock().clone()
    }

    /// Saved quiz answers; empty if the quiz was never completed.
    pub fn quiz_answers(&self) -> Vec<usize> {
        self.lock().quiz_answers.clone()
    }

    pub fn has_completed_quiz(&self) -> bool {
        !self.lock().quiz_answers.is_empty()
    }

    /// Saves the answers of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the settings cannot be written.
    pub fn record_quiz_completion(&self, answers: &[usize]) -> Result<(), StoreError> {
        self.update(|data| {
            data.quiz_answers = answers.to_vec();
            data.has_completed_quiz = !answers.is_empty();
        })
    }

    /// Forgets the quiz answers so the quiz is offered again.
    ///
    /// The cached recommendation stays; it is only reused for identical
    /// answers.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the settings cannot be written.
    pub fn reset_quiz(&self) -> Result<(), StoreError> {
        self.update(|data| {
            data.quiz_answers.clear();
            data.has_completed_quiz = false;
        })
    }

    /// Returns the cached recommendation if it was made for `answers_hash`.
    pub fn cached_recommendation(&self, answers_hash: u64) -> Option<RecommendationResponse> {
        let data = self.lock();
        match data.last_quiz_answers_hash {
            Some(hash) if hash == answers_hash => data.cached_recommendation.clone(),
            _ => None,
        }
    }

    /// Returns the last cached recommendation regardless of answers.
    pub fn last_recommendation(&self) -> Option<RecommendationResponse> {
        self.lock().cached_recommendation.clone()
    }

    /// Caches a recommendation for `answers_hash`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the settings cannot be written.
    pub fn cache_recommendation(
        &self,
        answers_hash: u64,
        response: &RecommendationResponse,
    ) -> Result<(), StoreError> {
        self.update(|data| {
            data.last_quiz_answers_hash = Some(answers_hash);
            data.cached_recommendation = Some(response.clone());
        })
    }

    fn lock(&self) -> MutexGuard<'_, SettingsData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, change: impl FnOnce(&mut SettingsData)) -> Result<(), StoreError> {
        let mut data = self.lock();
        change(&mut *data);
        match &self.path {
            Some(path) => write_settings(path, &data),
            None => Ok(()),
        }
    }
}

fn write_settings(path: &Path, data: &SettingsData) -> Result<(), StoreError> {
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let partial = path.with_extension("json.part");
    fs::write(&partial, json).map_err(io_error)?;
    fs::rename(&partial, path).map_err(io_error)?;

    debug!("Settings saved to {}", path.display());
    Ok(())
}

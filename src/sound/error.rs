//! Sound system error types.
//!
//! This module defines the error types for asset resolution and playback.
//! None of them are fatal to a session: a failing sound is replaced by a
//! synthesized tone or dropped from the mix.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device is not available: {0}")]
    DeviceNotAvailable(String),

    /// No bundled or custom audio file exists for the sound.
    #[error("sound asset not found: {0}")]
    AssetNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream or sink.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The fallback tone could not be generated or persisted.
    #[error("failed to generate fallback tone: {0}")]
    ToneGenerationFailed(String),

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),

    /// None of the requested sounds could be started.
    #[error("none of the {0} selected sounds could be played")]
    NothingPlayable(usize),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::AssetNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if resolution should fall back to a synthesized tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        matches!(self, Self::AssetNotFound(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "Connect an audio output device",
            Self::AssetNotFound(_) => "A generated tone will be played instead",
            Self::DecodeError(_) => "The sound file may be corrupted",
            Self::StreamError(_) => "Check your audio settings",
            Self::ToneGenerationFailed(_) => "Check that the cache directory is writable",
            Self::PlaybackError(_) => "Try playing the session again",
            Self::NothingPlayable(_) => "Choose different sounds and try again",
        }
    }
}

//! Sound playback system for sleep sessions.
//!
//! This module provides the ambient mixer behind a session, including:
//!
//! - Asset resolution (bundled, user-provided, synthesized tone)
//! - Looping multi-track playback with per-sound volume
//! - Graceful degradation when a sound cannot be played
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  AssetResolver   │────▶│  Bundled / Custom │
//! │                  │     │  audio files      │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  ToneSynth        │
//! └────────┬─────────┘     │  (fallback WAV)   │
//!          │ tracks        └──────────────────┘
//!          ▼
//! ┌──────────────────┐
//! │ PlaybackSession  │ ← rodio or mock
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//! use drowsii::catalog::Sound;
//! use drowsii::sound::{AssetResolver, PlaybackSession, RodioPlaybackSession, ToneSynth};
//!
//! let resolver = AssetResolver::new(None, None, ToneSynth::new("/tmp/drowsii-tones"));
//! let mix = resolver.resolve_all(&[Sound::Rain, Sound::Fireplace]);
//!
//! let mut session = RodioPlaybackSession::new().expect("audio init");
//! session.play(&mix.tracks, 1800, &BTreeMap::new()).expect("playback failed");
//! ```

mod error;
mod player;
mod source;
mod tone;

use std::collections::BTreeMap;
use std::collections::HashSet;

pub use error::SoundError;
pub use player::RodioPlaybackSession;
pub use source::{AssetResolver, AudioSource, ResolvedMix, Track, TrackFailure};
pub use tone::{generate_tone, ToneSynth, TONE_AMPLITUDE, TONE_SAMPLE_RATE, TONE_SECONDS};

use crate::catalog::Sound;
use crate::types::clamp_volume;

/// Outcome of starting a mix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayReport {
    /// Sounds that are now playing, in track order.
    pub started: Vec<Sound>,
    /// Sounds the backend could not start.
    pub failures: Vec<TrackFailure>,
}

/// Trait for the audio side of a session.
///
/// This trait abstracts playback, allowing for different implementations
/// (e.g., rodio-based, mock for testing). Calling `stop` is always safe,
/// even if nothing is playing.
pub trait PlaybackSession {
    /// Starts every track looping indefinitely at its volume.
    ///
    /// Any previous mix is stopped first, so this is safe to call after
    /// `stop`. Sounds missing from `volumes` play at the default volume.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::NothingPlayable` if no track could be started.
    fn play(
        &mut self,
        tracks: &[Track],
        duration_seconds: u32,
        volumes: &BTreeMap<Sound, f32>,
    ) -> Result<PlayReport, SoundError>;

    /// Pauses every track, keeping the mix.
    fn pause(&mut self);

    /// Resumes a paused mix.
    fn resume(&mut self);

    /// Stops every track and releases playback resources.
    fn stop(&mut self);

    /// Sets one sound's volume; ignored for sounds not in the mix.
    fn set_volume(&mut self, sound: Sound, level: f32);

    /// Returns true if the mix is audible.
    fn is_playing(&self) -> bool;
}

/// A call recorded by `MockPlaybackSession`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCall {
    Play {
        sounds: Vec<Sound>,
        duration_seconds: u32,
        volumes: BTreeMap<Sound, f32>,
    },
    Pause,
    Resume,
    Stop,
    SetVolume(Sound, f32),
}

/// Mock playback session for testing.
#[derive(Debug, Default)]
pub struct MockPlaybackSession {
    calls: Vec<PlaybackCall>,
    failing: HashSet<Sound>,
    playing: Vec<Sound>,
    paused: bool,
}

impl MockPlaybackSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the backend refuse to start `sound`.
    pub fn fail_sound(&mut self, sound: Sound) {
        self.failing.insert(sound);
    }

    #[must_use]
    pub fn calls(&self) -> &[PlaybackCall] {
        &self.calls
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PlaybackCall::Play { .. }))
            .count()
    }

    /// Returns the sounds of the current mix.
    #[must_use]
    pub fn playing_sounds(&self) -> &[Sound] {
        &self.playing
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl PlaybackSession for MockPlaybackSession {
    fn play(
        &mut self,
        tracks: &[Track],
        duration_seconds: u32,
        volumes: &BTreeMap<Sound, f32>,
    ) -> Result<PlayReport, SoundError> {
        self.calls.push(PlaybackCall::Play {
            sounds: tracks.iter().map(|t| t.sound).collect(),
            duration_seconds,
            volumes: volumes.clone(),
        });
        self.playing.clear();
        self.paused = false;

        let mut report = PlayReport::default();
        for track in tracks {
            if self.failing.contains(&track.sound) {
                report.failures.push(TrackFailure {
                    sound: track.sound,
                    error: SoundError::PlaybackError("Mock failure".to_string()),
                });
            } else {
                report.started.push(track.sound);
            }
        }

        if report.started.is_empty() {
            return Err(SoundError::NothingPlayable(tracks.len()));
        }
        self.playing = report.started.clone();
        Ok(report)
    }

    fn pause(&mut self) {
        self.calls.push(PlaybackCall::Pause);
        self.paused = true;
    }

    fn resume(&mut self) {
        self.calls.push(PlaybackCall::Resume);
        self.paused = false;
    }

    fn stop(&mut self) {
        self.calls.push(PlaybackCall::Stop);
        self.playing.clear();
        self.paused = false;
    }

    fn set_volume(&mut self, sound: Sound, level: f32) {
        self.calls.push(PlaybackCall::SetVolume(sound, clamp_volume(level)));
    }

    fn is_playing(&self) -> bool {
        !self.playing.is_empty() && !self.paused
    }
}

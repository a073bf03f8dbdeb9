//! Playback session implementation using rodio.
//!
//! This module provides the `RodioPlaybackSession` which loops every track
//! of a session in its own `Sink`, so each sound keeps an independent volume.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{Track, TrackFailure};
use super::{PlayReport, PlaybackSession};
use crate::catalog::Sound;
use crate::types::{clamp_volume, DEFAULT_VOLUME};

/// A playback session that mixes looping tracks through rodio.
///
/// The output stream is not `Send`; keep the session on the thread that
/// created it.
pub struct RodioPlaybackSession {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// One sink per playing sound.
    sinks: HashMap<Sound, Sink>,
    /// Whether the mix is currently audible.
    playing: bool,
}

impl RodioPlaybackSession {
    /// Opens the default audio output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sinks: HashMap::new(),
            playing: false,
        })
    }

    /// Opens, decodes and starts looping one track.
    fn start_track(&self, track: &Track, volume: f32) -> Result<Sink, SoundError> {
        let path = track.source.path();
        let file = File::open(path)
            .map_err(|e| SoundError::AssetNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.set_volume(clamp_volume(volume));
        sink.append(decoder.repeat_infinite());

        debug!(
            "Looping {} from {} source {}",
            track.sound,
            track.source.kind(),
            path.display()
        );
        Ok(sink)
    }
}

impl PlaybackSession for RodioPlaybackSession {
    fn play(
        &mut self,
        tracks: &[Track],
        duration_seconds: u32,
        volumes: &BTreeMap<Sound, f32>,
    ) -> Result<PlayReport, SoundError> {
        self.stop();

        let mut report = PlayReport::default();
        for track in tracks {
            let volume = volumes.get(&track.sound).copied().unwrap_or(DEFAULT_VOLUME);
            match self.start_track(track, volume) {
                Ok(sink) => {
                    self.sinks.insert(track.sound, sink);
                    report.started.push(track.sound);
                }
                Err(error) => {
                    warn!("Unable to play {}: {}", track.sound, error);
                    report.failures.push(TrackFailure {
                        sound: track.sound,
                        error,
                    });
                }
            }
        }

        if report.started.is_empty() {
            return Err(SoundError::NothingPlayable(tracks.len()));
        }

        self.playing = true;
        debug!(
            "Playing {} track(s) for up to {}s",
            report.started.len(),
            duration_seconds
        );
        Ok(report)
    }

    fn pause(&mut self) {
        for sink in self.sinks.values() {
            sink.pause();
        }
        self.playing = false;
    }

    fn resume(&mut self) {
        for sink in self.sinks.values() {
            sink.play();
        }
        self.playing = !self.sinks.is_empty();
    }

    fn stop(&mut self) {
        for (_, sink) in self.sinks.drain() {
            sink.stop();
        }
        self.playing = false;
    }

    fn set_volume(&mut self, sound: Sound, level: f32) {
        if let Some(sink) = self.sinks.get(&sound) {
            sink.set_volume(clamp_volume(level));
        }
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

impl std::fmt::Debug for RodioPlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioPlaybackSession")
            .field("tracks", &self.sinks.len())
            .field("playing", &self.playing)
            .finish_non_exhaustive()
    }
}

impl Drop for RodioPlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::{AudioSource, ToneSynth};

    // Note: These tests may fail in environments without audio hardware
    // (e.g., CI containers). Tests are designed to handle this gracefully.

    #[test]
    fn test_stop_is_safe_when_idle() {
        let mut session = match RodioPlaybackSession::new() {
            Ok(s) => s,
            Err(_) => return, // Skip test if no audio
        };

        session.stop();
        session.stop();
        assert!(!session.is_playing());
    }

    #[test]
    fn test_missing_file_reports_nothing_playable() {
        let mut session = match RodioPlaybackSession::new() {
            Ok(s) => s,
            Err(_) => return,
        };

        let tracks = vec![Track {
            sound: Sound::Rain,
            source: AudioSource::Bundled {
                path: "/nonexistent/Rain.wav".into(),
            },
        }];
        let result = session.play(&tracks, 60, &BTreeMap::new());
        assert_eq!(result, Err(SoundError::NothingPlayable(1)));
        assert!(!session.is_playing());
    }

    #[test]
    fn test_play_pause_resume_generated_tone() {
        let mut session = match RodioPlaybackSession::new() {
            Ok(s) => s,
            Err(_) => return,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = ToneSynth::new(dir.path()).ensure_tone(Sound::Ocean).unwrap();
        let tracks = vec![Track {
            sound: Sound::Ocean,
            source: AudioSource::Tone {
                frequency: 500.0,
                path,
            },
        }];

        let report = session.play(&tracks, 60, &BTreeMap::new()).unwrap();
        assert_eq!(report.started, vec![Sound::Ocean]);
        assert!(session.is_playing());

        session.set_volume(Sound::Ocean, 0.2);
        session.pause();
        assert!(!session.is_playing());
        session.resume();
        assert!(session.is_playing());
        session.stop();
        assert!(!session.is_playing());
    }

    #[test]
    fn test_debug_impl() {
        let session = match RodioPlaybackSession::new() {
            Ok(s) => s,
            Err(_) => return,
        };

        let debug_str = format!("{:?}", session);
        assert!(debug_str.contains("RodioPlaybackSession"));
    }
}

//! Synthesized fallback tones.
//!
//! When a sound has no audio file, a steady sine tone at the sound's
//! reference frequency is written to a WAV file in the cache directory and
//! looped in its place.

use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use super::error::SoundError;
use crate::catalog::Sound;

/// Sample rate of generated tones (Hz).
pub const TONE_SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude of generated tones.
pub const TONE_AMPLITUDE: f32 = 0.3;

/// Length of one generated tone loop, in seconds.
pub const TONE_SECONDS: u32 = 1;

/// Generates one loop of a mono sine tone.
pub fn generate_tone(frequency: f32, sample_rate: u32, seconds: u32) -> Vec<f32> {
    let frame_count = (sample_rate * seconds) as usize;
    (0..frame_count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * PI * frequency * t).sin() * TONE_AMPLITUDE
        })
        .collect()
}

/// Writes fallback tones into a cache directory.
#[derive(Debug, Clone)]
pub struct ToneSynth {
    cache_dir: PathBuf,
}

impl ToneSynth {
    /// Creates a synth that writes tones into `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns where the tone for `sound` is stored.
    pub fn tone_path(&self, sound: Sound) -> PathBuf {
        self.cache_dir.join(format!("{}.wav", sound.storage_key()))
    }

    /// Returns the path of the sound's tone file, writing it if missing.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::ToneGenerationFailed` if the cache directory or
    /// the WAV file cannot be written.
    pub fn ensure_tone(&self, sound: Sound) -> Result<PathBuf, SoundError> {
        let path = self.tone_path(sound);
        if path.is_file() {
            return Ok(path);
        }

        fs::create_dir_all(&self.cache_dir).map_err(|e| {
            SoundError::ToneGenerationFailed(format!("{}: {}", self.cache_dir.display(), e))
        })?;

        // Only complete files are renamed into place.
        let partial = path.with_extension("wav.part");
        let samples = generate_tone(sound.fallback_frequency(), TONE_SAMPLE_RATE, TONE_SECONDS);
        if let Err(e) = write_wav(&partial, &samples) {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        fs::rename(&partial, &path).map_err(|e| {
            let _ = fs::remove_file(&partial);
            SoundError::ToneGenerationFailed(format!("{}: {}", path.display(), e))
        })?;

        debug!(
            "Generated {} Hz fallback tone for {} at {}",
            sound.fallback_frequency(),
            sound,
            path.display()
        );
        Ok(path)
    }
}

fn write_wav(path: &Path, samples: &[f32]) -> Result<(), SoundError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: TONE_SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let to_error = |e: hound::Error| {
        SoundError::ToneGenerationFailed(format!("{}: {}", path.display(), e))
    };

    let mut writer = WavWriter::create(path, spec).map_err(to_error)?;
    for sample in samples {
        writer.write_sample(*sample).map_err(to_error)?;
    }
    writer.finalize().map_err(to_error)
}

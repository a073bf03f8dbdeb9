//! Audio source resolution.
//!
//! Each selected sound is resolved to a file, in order of priority:
//!
//! 1. A bundled asset (`<bundled>/<Key>.<ext>`, also under `Sounds/`)
//! 2. A user-provided file (`<custom>/<key>.<ext>` or `<custom>/<key>.mp3`)
//! 3. A synthesized tone at the sound's reference frequency
//!
//! A sound whose tone cannot be written either is reported as a failure and
//! left out of the mix.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::ToneSynth;
use crate::catalog::Sound;

/// Where a sound's audio comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// An asset shipped with the application.
    Bundled {
        /// Full path of the asset file.
        path: PathBuf,
    },
    /// A file the user added.
    Custom {
        /// Full path of the user's file.
        path: PathBuf,
    },
    /// A generated sine tone.
    Tone {
        /// Tone frequency in Hz.
        frequency: f32,
        /// Path of the persisted WAV file.
        path: PathBuf,
    },
}

impl AudioSource {
    /// Returns the file to decode.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Bundled { path } | Self::Custom { path } | Self::Tone { path, .. } => path,
        }
    }

    /// Returns true if this is a synthesized tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns a short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bundled { .. } => "bundled",
            Self::Custom { .. } => "custom",
            Self::Tone { .. } => "tone",
        }
    }
}

/// A sound paired with the audio that will play for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub sound: Sound,
    pub source: AudioSource,
}

/// A sound that could not be included in the mix.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFailure {
    pub sound: Sound,
    pub error: SoundError,
}

/// Result of resolving a whole selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMix {
    /// Playable tracks in selection order.
    pub tracks: Vec<Track>,
    /// Sounds left out of the mix.
    pub failures: Vec<TrackFailure>,
}

/// Resolves sounds to playable audio files.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    bundled_dir: Option<PathBuf>,
    custom_dir: Option<PathBuf>,
    synth: ToneSynth,
}

impl AssetResolver {
    /// Creates a resolver.
    ///
    /// Either directory may be absent, in which case that stage is skipped.
    pub fn new(
        bundled_dir: Option<PathBuf>,
        custom_dir: Option<PathBuf>,
        synth: ToneSynth,
    ) -> Self {
        Self {
            bundled_dir,
            custom_dir,
            synth,
        }
    }

    /// Finds an existing bundled or custom file for the sound.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::AssetNotFound` if no file exists.
    pub fn find_asset(&self, sound: Sound) -> Result<AudioSource, SoundError> {
        if let Some(dir) = &self.bundled_dir {
            if let Some(path) = first_existing(bundled_candidates(dir, sound)) {
                return Ok(AudioSource::Bundled { path });
            }
        }
        if let Some(dir) = &self.custom_dir {
            if let Some(path) = first_existing(custom_candidates(dir, sound)) {
                return Ok(AudioSource::Custom { path });
            }
        }
        Err(SoundError::AssetNotFound(format!(
            "no audio file for '{}'",
            sound.storage_key()
        )))
    }

    /// Resolves one sound, synthesizing a tone if no file exists.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::ToneGenerationFailed` if the fallback tone cannot
    /// be written.
    pub fn resolve(&self, sound: Sound) -> Result<AudioSource, SoundError> {
        match self.find_asset(sound) {
            Ok(source) => Ok(source),
            Err(e) if e.should_fallback_to_tone() => {
                debug!("{}: {}, using generated tone", sound, e);
                let path = self.synth.ensure_tone(sound)?;
                Ok(AudioSource::Tone {
                    frequency: sound.fallback_frequency(),
                    path,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves every sound, collecting failures instead of stopping.
    pub fn resolve_all(&self, sounds: &[Sound]) -> ResolvedMix {
        let mut mix = ResolvedMix::default();
        for &sound in sounds {
            match self.resolve(sound) {
                Ok(source) => {
                    debug!("Resolved {} to {} source", sound, source.kind());
                    mix.tracks.push(Track { sound, source });
                }
                Err(error) => {
                    warn!("Dropping {} from the mix: {}", sound, error);
                    mix.failures.push(TrackFailure { sound, error });
                }
            }
        }
        mix
    }
}

/// Returns the storage key with its first letter upper-cased.
fn capitalized_key(sound: Sound) -> String {
    let key = sound.storage_key();
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn bundled_candidates(dir: &Path, sound: Sound) -> Vec<PathBuf> {
    let ext = sound.file_format().extension();
    let capitalized = format!("{}.{}", capitalized_key(sound), ext);
    let plain = format!("{}.{}", sound.storage_key(), ext);
    vec![
        dir.join(&capitalized),
        dir.join("Sounds").join(&capitalized),
        dir.join(&plain),
        dir.join("Sounds").join(&plain),
    ]
}

fn custom_candidates(dir: &Path, sound: Sound) -> Vec<PathBuf> {
    let key = sound.storage_key();
    let ext = sound.file_format().extension();
    let mut candidates = vec![dir.join(format!("{}.{}", key, ext))];
    if ext != "mp3" {
        candidates.push(dir.join(format!("{}.mp3", key)));
    }
    candidates
}

fn first_existing(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

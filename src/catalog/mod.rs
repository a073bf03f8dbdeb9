//! Sound catalog for sleep sessions.
//!
//! This module defines the fixed reference data used by the session wizard:
//! - Sound categories (white, pink, brown noise and nature)
//! - The 24 sounds and their playback metadata
//! - Category to sound lookups and icon names
//!
//! Every attribute is an exhaustive `match` with no wildcard arm, so adding a
//! variant fails to compile until each table is updated.

use serde::{Deserialize, Serialize};

// ============================================================================
// SoundCategory
// ============================================================================

/// A group of related sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoundCategory {
    #[serde(rename = "White Noise")]
    White,
    #[serde(rename = "Pink Noise")]
    Pink,
    #[serde(rename = "Brown Noise")]
    Brown,
    #[serde(rename = "Nature")]
    Nature,
}

impl SoundCategory {
    /// All categories in display order.
    pub const ALL: [SoundCategory; 4] = [
        SoundCategory::White,
        SoundCategory::Pink,
        SoundCategory::Brown,
        SoundCategory::Nature,
    ];

    /// Returns the display label, which is also the category's identity.
    pub fn label(&self) -> &'static str {
        match self {
            SoundCategory::White => "White Noise",
            SoundCategory::Pink => "Pink Noise",
            SoundCategory::Brown => "Brown Noise",
            SoundCategory::Nature => "Nature",
        }
    }

    /// Returns the icon name shown on the category grid.
    pub fn icon(&self) -> &'static str {
        match self {
            SoundCategory::White => "waveform",
            SoundCategory::Pink => "waveform.path",
            SoundCategory::Brown => "waveform.path.ecg",
            SoundCategory::Nature => "leaf",
        }
    }

    /// Looks up a category by label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
    }

    /// Returns the sounds offered under this category.
    pub fn sounds(&self) -> &'static [Sound] {
        sounds_for(*self)
    }
}

impl std::fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Sound
// ============================================================================

/// A single ambient sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    // White noise family
    WhiteNoise,
    Fan,
    AirConditioner,
    Static,
    Shower,
    Waterfall,
    // Pink noise family
    PinkNoise,
    Rain,
    Ocean,
    Stream,
    Bubbles,
    Wind,
    // Brown noise family
    BrownNoise,
    Thunder,
    Fireplace,
    Drum,
    Heartbeat,
    Engine,
    // Nature
    Forest,
    Birds,
    Crickets,
    Waves,
    Leaves,
    Campfire,
}

/// Container format of a bundled sound asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Wav,
    Mp3,
}

impl FileFormat {
    /// Returns the file extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Wav => "wav",
            FileFormat::Mp3 => "mp3",
        }
    }
}

impl Sound {
    /// Every sound, grouped by category in catalog order.
    pub const ALL: [Sound; 24] = [
        Sound::WhiteNoise,
        Sound::Fan,
        Sound::AirConditioner,
        Sound::Static,
        Sound::Shower,
        Sound::Waterfall,
        Sound::PinkNoise,
        Sound::Rain,
        Sound::Ocean,
        Sound::Stream,
        Sound::Bubbles,
        Sound::Wind,
        Sound::BrownNoise,
        Sound::Thunder,
        Sound::Fireplace,
        Sound::Drum,
        Sound::Heartbeat,
        Sound::Engine,
        Sound::Forest,
        Sound::Birds,
        Sound::Crickets,
        Sound::Waves,
        Sound::Leaves,
        Sound::Campfire,
    ];

    /// Returns the name shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sound::WhiteNoise => "White Noise",
            Sound::Fan => "Fan",
            Sound::AirConditioner => "Air Conditioner",
            Sound::Static => "Static",
            Sound::Shower => "Shower",
            Sound::Waterfall => "Waterfall",
            Sound::PinkNoise => "Pink Noise",
            Sound::Rain => "Rain",
            Sound::Ocean => "Ocean",
            Sound::Stream => "Stream",
            Sound::Bubbles => "Bubbles",
            Sound::Wind => "Wind",
            Sound::BrownNoise => "Brown Noise",
            Sound::Thunder => "Thunder",
            Sound::Fireplace => "Fireplace",
            Sound::Drum => "Drum",
            Sound::Heartbeat => "Heartbeat",
            Sound::Engine => "Engine",
            Sound::Forest => "Forest",
            Sound::Birds => "Birds",
            Sound::Crickets => "Crickets",
            Sound::Waves => "Waves",
            Sound::Leaves => "Leaves",
            Sound::Campfire => "Campfire",
        }
    }

    /// Returns the storage key used to look up audio assets.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Sound::WhiteNoise => "white_noise",
            Sound::Fan => "fan",
            Sound::AirConditioner => "air_conditioner",
            Sound::Static => "static",
            Sound::Shower => "shower",
            Sound::Waterfall => "waterfall",
            Sound::PinkNoise => "pink_noise",
            Sound::Rain => "rain",
            Sound::Ocean => "ocean",
            Sound::Stream => "stream",
            Sound::Bubbles => "bubbles",
            Sound::Wind => "wind",
            Sound::BrownNoise => "brown_noise",
            Sound::Thunder => "thunder",
            Sound::Fireplace => "fireplace",
            Sound::Drum => "drum",
            Sound::Heartbeat => "heartbeat",
            Sound::Engine => "engine",
            Sound::Forest => "forest",
            Sound::Birds => "birds",
            Sound::Crickets => "crickets",
            Sound::Waves => "waves",
            Sound::Leaves => "leaves",
            Sound::Campfire => "campfire",
        }
    }

    /// Returns the reference frequency (Hz) of the synthetic fallback tone.
    ///
    /// Only used when no bundled or custom asset resolves.
    pub fn fallback_frequency(&self) -> f32 {
        match self {
            Sound::WhiteNoise => 1000.0,
            Sound::Fan => 800.0,
            Sound::AirConditioner => 1200.0,
            Sound::Static => 1500.0,
            Sound::Shower => 900.0,
            Sound::Waterfall => 1100.0,
            Sound::PinkNoise => 750.0,
            Sound::Rain => 600.0,
            Sound::Ocean => 500.0,
            Sound::Stream => 650.0,
            Sound::Bubbles => 700.0,
            Sound::Wind => 550.0,
            Sound::BrownNoise => 400.0,
            Sound::Thunder => 200.0,
            Sound::Fireplace => 300.0,
            Sound::Drum => 250.0,
            Sound::Heartbeat => 150.0,
            Sound::Engine => 350.0,
            Sound::Forest => 450.0,
            Sound::Birds => 800.0,
            Sound::Crickets => 300.0,
            Sound::Waves => 400.0,
            Sound::Leaves => 350.0,
            Sound::Campfire => 280.0,
        }
    }

    /// Returns the format hint for the bundled asset.
    pub fn file_format(&self) -> FileFormat {
        match self {
            Sound::Birds | Sound::Forest | Sound::Crickets => FileFormat::Mp3,
            Sound::WhiteNoise
            | Sound::Fan
            | Sound::AirConditioner
            | Sound::Static
            | Sound::Shower
            | Sound::Waterfall
            | Sound::PinkNoise
            | Sound::Rain
            | Sound::Ocean
            | Sound::Stream
            | Sound::Bubbles
            | Sound::Wind
            | Sound::BrownNoise
            | Sound::Thunder
            | Sound::Fireplace
            | Sound::Drum
            | Sound::Heartbeat
            | Sound::Engine
            | Sound::Waves
            | Sound::Leaves
            | Sound::Campfire => FileFormat::Wav,
        }
    }

    /// Returns the icon name shown next to the sound.
    pub fn icon(&self) -> &'static str {
        match self {
            Sound::WhiteNoise => "waveform",
            Sound::Fan => "fan",
            Sound::AirConditioner => "snowflake",
            Sound::Static => "radio",
            Sound::Shower => "drop",
            Sound::Waterfall => "water.waves.and.arrow.up",
            Sound::PinkNoise => "waveform.path",
            Sound::Rain => "cloud.rain",
            Sound::Ocean => "water.waves",
            Sound::Stream => "water.waves.and.arrow.down",
            Sound::Bubbles => "bubble.left.and.bubble.right",
            Sound::Wind => "wind",
            Sound::BrownNoise => "waveform.path.ecg",
            Sound::Thunder => "cloud.bolt.rain",
            Sound::Fireplace => "flame",
            Sound::Drum => "music.note",
            Sound::Heartbeat => "heart",
            Sound::Engine => "gearshape",
            Sound::Forest => "leaf",
            Sound::Birds => "bird",
            Sound::Crickets => "ant",
            Sound::Waves => "water.waves",
            Sound::Leaves => "leaf.arrow.circlepath",
            Sound::Campfire => "flame.fill",
        }
    }

    /// Returns the category whose catalog list contains this sound.
    pub fn category(&self) -> SoundCategory {
        category_of(*self)
    }

    /// Looks up a sound by display name or storage key, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|sound| {
            sound.display_name().eq_ignore_ascii_case(name)
                || sound.storage_key().eq_ignore_ascii_case(name)
        })
    }
}

impl std::fmt::Display for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Lookups
// ============================================================================

const WHITE_SOUNDS: [Sound; 6] = [
    Sound::WhiteNoise,
    Sound::Fan,
    Sound::AirConditioner,
    Sound::Static,
    Sound::Shower,
    Sound::Waterfall,
];

const PINK_SOUNDS: [Sound; 6] = [
    Sound::PinkNoise,
    Sound::Rain,
    Sound::Ocean,
    Sound::Stream,
    Sound::Bubbles,
    Sound::Wind,
];

const BROWN_SOUNDS: [Sound; 6] = [
    Sound::BrownNoise,
    Sound::Thunder,
    Sound::Fireplace,
    Sound::Drum,
    Sound::Heartbeat,
    Sound::Engine,
];

const NATURE_SOUNDS: [Sound; 6] = [
    Sound::Forest,
    Sound::Birds,
    Sound::Crickets,
    Sound::Waves,
    Sound::Leaves,
    Sound::Campfire,
];

/// Returns the ordered sounds offered under a category.
pub fn sounds_for(category: SoundCategory) -> &'static [Sound] {
    match category {
        SoundCategory::White => &WHITE_SOUNDS,
        SoundCategory::Pink => &PINK_SOUNDS,
        SoundCategory::Brown => &BROWN_SOUNDS,
        SoundCategory::Nature => &NATURE_SOUNDS,
    }
}

/// Returns the category a sound is listed under.
pub fn category_of(sound: Sound) -> SoundCategory {
    match sound {
        Sound::WhiteNoise
        | Sound::Fan
        | Sound::AirConditioner
        | Sound::Static
        | Sound::Shower
        | Sound::Waterfall => SoundCategory::White,
        Sound::PinkNoise
        | Sound::Rain
        | Sound::Ocean
        | Sound::Stream
        | Sound::Bubbles
        | Sound::Wind => SoundCategory::Pink,
        Sound::BrownNoise
        | Sound::Thunder
        | Sound::Fireplace
        | Sound::Drum
        | Sound::Heartbeat
        | Sound::Engine => SoundCategory::Brown,
        Sound::Forest
        | Sound::Birds
        | Sound::Crickets
        | Sound::Waves
        | Sound::Leaves
        | Sound::Campfire => SoundCategory::Nature,
    }
}

/// Returns the icon name for a sound.
pub fn icon_for(sound: Sound) -> &'static str {
    sound.icon()
}

/// Returns the display name for a sound.
pub fn display_name(sound: Sound) -> &'static str {
    sound.display_name()
}

// ============================================================================
// Tests
// ============================================================================

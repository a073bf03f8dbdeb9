//! Core data types for sleep sound sessions.
//!
//! This module defines the data structures used for:
//! - Wizard step tracking and the in-progress session draft
//! - Playback phase and derived playback state
//! - Duration and alarm presets offered by front ends

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Sound, SoundCategory};

/// Alarm label meaning "play no alarm". Distinct from an unset alarm.
pub const NO_ALARM: &str = "No Alarm";

/// Alarm labels offered on the alarm step.
pub const ALARM_OPTIONS: [&str; 6] = [
    NO_ALARM,
    "Gentle Chimes",
    "Birdsong",
    "Classic Bell",
    "Soft Piano",
    "Ocean Sunrise",
];

/// Duration presets offered on the duration step, as (label, seconds).
pub const DURATION_OPTIONS: [(&str, u32); 5] = [
    ("30 minutes", 1800),
    ("1 hour", 3600),
    ("2 hours", 7200),
    ("4 hours", 14400),
    ("8 hours", 28800),
];

/// Volume each sound starts at before the user moves its slider.
pub const DEFAULT_VOLUME: f32 = 0.5;

// ============================================================================
// WizardStep
// ============================================================================

/// A step of the session wizard, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Choosing a sound category
    #[default]
    Category,
    /// Choosing one or more sounds
    Sound,
    /// Choosing how long to play
    Duration,
    /// Choosing an alarm
    Alarm,
    /// Reviewing and playing the session
    Summary,
}

impl WizardStep {
    /// Returns the string representation of the step.
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Category => "category",
            WizardStep::Sound => "sound",
            WizardStep::Duration => "duration",
            WizardStep::Alarm => "alarm",
            WizardStep::Summary => "summary",
        }
    }

    /// Returns the step that follows this one on forward navigation.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Category => Some(WizardStep::Sound),
            WizardStep::Sound => Some(WizardStep::Duration),
            WizardStep::Duration => Some(WizardStep::Alarm),
            WizardStep::Alarm => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SessionDraft
// ============================================================================

/// The wizard's working record of choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    /// Chosen category, unset until the first step completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SoundCategory>,
    /// Chosen sounds in selection order, without duplicates
    #[serde(default)]
    pub sounds: Vec<Sound>,
    /// Chosen duration in seconds
    #[serde(rename = "durationSeconds", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Chosen alarm label; `NO_ALARM` is a real choice
    #[serde(rename = "alarmLabel", skip_serializing_if = "Option::is_none")]
    pub alarm_label: Option<String>,
}

impl SessionDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the sound if absent, removes it if present.
    ///
    /// Re-adding appends at the end. Returns true if the sound is now selected.
    pub fn toggle_sound(&mut self, sound: Sound) -> bool {
        if let Some(idx) = self.sounds.iter().position(|s| *s == sound) {
            self.sounds.remove(idx);
            false
        } else {
            self.sounds.push(sound);
            true
        }
    }

    /// Returns true if the sound is selected.
    pub fn contains(&self, sound: Sound) -> bool {
        self.sounds.contains(&sound)
    }

    /// Returns true if the alarm row should be shown for this draft.
    pub fn shows_alarm(&self) -> bool {
        self.alarm_label.as_deref().is_some_and(shows_alarm_row)
    }
}

/// Returns true if an alarm label should be displayed as an alarm row.
pub fn shows_alarm_row(label: &str) -> bool {
    label != NO_ALARM
}

// ============================================================================
// PlaybackPhase / PlaybackState
// ============================================================================

/// Lifecycle phase of a presented session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Presented, not started (or stopped); remaining time is the full duration
    #[default]
    Ready,
    /// Audio and countdown running
    Playing,
    /// Audio and countdown paused; remaining time preserved
    Paused,
    /// Countdown reached zero; playing again restarts from the full duration
    Finished,
}

impl PlaybackPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackPhase::Ready => "ready",
            PlaybackPhase::Playing => "playing",
            PlaybackPhase::Paused => "paused",
            PlaybackPhase::Finished => "finished",
        }
    }

    /// Returns true if the countdown is running.
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackPhase::Playing)
    }
}

/// Snapshot of a session's playback, derived from the summary controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Sounds in the mix, in selection order
    pub sounds: Vec<Sound>,
    /// Per-sound volume in [0, 1]
    pub volumes: BTreeMap<Sound, f32>,
    /// Seconds left on the countdown
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Whether audio is currently playing
    #[serde(rename = "isPlaying")]
    pub is_playing: bool,
    /// Current phase
    pub phase: PlaybackPhase,
}

/// Formats seconds as `MM:SS`, or `HH:MM:SS` from one hour up.
pub fn format_duration(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = total_seconds / 60 % 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Clamps a volume level into [0, 1]; NaN becomes silence.
pub fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Session summary controller.
//!
//! Presents a completed draft as a playable session: it owns the playback
//! backend while the summary is shown, drives the countdown and keeps the
//! per-sound volumes.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::countdown::{Countdown, CountdownTick};
use super::error::{SessionError, SessionNotice};
use crate::catalog::{Sound, SoundCategory};
use crate::sound::{AssetResolver, PlaybackSession, SoundError};
use crate::types::{
    clamp_volume, format_duration, shows_alarm_row, PlaybackPhase, PlaybackState, SessionDraft,
    WizardStep, DEFAULT_VOLUME,
};
use crate::wizard::EditTarget;

// ============================================================================
// SessionConfig
// ============================================================================

/// The choices a summary is presented with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub category: SoundCategory,
    /// Sounds in selection order, never empty
    pub sounds: Vec<Sound>,
    /// Full session length, never zero
    pub duration_seconds: u32,
    pub alarm_label: Option<String>,
}

impl TryFrom<&SessionDraft> for SessionConfig {
    type Error = SessionError;

    fn try_from(draft: &SessionDraft) -> Result<Self, Self::Error> {
        let category = draft
            .category
            .ok_or(SessionError::IncompleteDraft("category"))?;
        if draft.sounds.is_empty() {
            return Err(SessionError::IncompleteDraft("sound"));
        }
        let duration_seconds = draft
            .duration_seconds
            .filter(|seconds| *seconds > 0)
            .ok_or(SessionError::IncompleteDraft("duration"))?;

        Ok(Self {
            category,
            sounds: draft.sounds.clone(),
            duration_seconds,
            alarm_label: draft.alarm_label.clone(),
        })
    }
}

// ============================================================================
// SessionSummary
// ============================================================================

/// One row of the summary's sound list.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub sound: Sound,
    pub name: &'static str,
    pub icon: &'static str,
    pub volume: f32,
}

/// What the summary screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub category: SoundCategory,
    pub tracks: Vec<TrackRow>,
    /// Full duration as `MM:SS` or `HH:MM:SS`
    pub duration_label: String,
    /// Present only when an alarm other than "No Alarm" was chosen
    pub alarm: Option<String>,
    pub remaining_label: String,
    pub phase: PlaybackPhase,
    pub is_playing: bool,
}

// ============================================================================
// SessionSummaryController
// ============================================================================

/// Controls playback for a presented session.
#[derive(Debug)]
pub struct SessionSummaryController<P: PlaybackSession> {
    config: SessionConfig,
    playback: P,
    resolver: AssetResolver,
    volumes: BTreeMap<Sound, f32>,
    remaining_seconds: u32,
    phase: PlaybackPhase,
    countdown: Countdown,
    tick_rx: mpsc::UnboundedReceiver<CountdownTick>,
    notices: Vec<SessionNotice>,
}

impl<P: PlaybackSession> SessionSummaryController<P> {
    /// Presents a completed draft. Nothing plays until `toggle_playback`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteDraft` if the draft has no category,
    /// no sounds or no duration.
    pub fn present(
        draft: &SessionDraft,
        playback: P,
        resolver: AssetResolver,
    ) -> Result<Self, SessionError> {
        let config = SessionConfig::try_from(draft)?;
        Ok(Self::new(config, playback, resolver))
    }

    /// Creates a controller from an already validated config.
    pub fn new(config: SessionConfig, playback: P, resolver: AssetResolver) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let volumes = config
            .sounds
            .iter()
            .map(|sound| (*sound, DEFAULT_VOLUME))
            .collect();

        debug!(
            "Presenting {} session with {} sound(s) for {}",
            config.category,
            config.sounds.len(),
            format_duration(config.duration_seconds)
        );

        Self {
            remaining_seconds: config.duration_seconds,
            config,
            playback,
            resolver,
            volumes,
            phase: PlaybackPhase::Ready,
            countdown: Countdown::new(tick_tx),
            tick_rx,
            notices: Vec::new(),
        }
    }

    /// Restores previously chosen volumes for sounds in this session.
    #[must_use]
    pub fn with_volumes(mut self, volumes: &BTreeMap<Sound, f32>) -> Self {
        for (sound, level) in volumes {
            if let Some(current) = self.volumes.get_mut(sound) {
                *current = clamp_volume(*level);
            }
        }
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    /// Returns the stored volume for a sound in this session.
    pub fn volume(&self, sound: Sound) -> Option<f32> {
        self.volumes.get(&sound).copied()
    }

    pub fn volumes(&self) -> &BTreeMap<Sound, f32> {
        &self.volumes
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Returns a snapshot of the playback state.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            sounds: self.config.sounds.clone(),
            volumes: self.volumes.clone(),
            remaining_seconds: self.remaining_seconds,
            is_playing: self.is_playing(),
            phase: self.phase,
        }
    }

    /// Builds the summary view.
    pub fn summary(&self) -> SessionSummary {
        let tracks = self
            .config
            .sounds
            .iter()
            .map(|sound| TrackRow {
                sound: *sound,
                name: sound.display_name(),
                icon: sound.icon(),
                volume: self.volumes.get(sound).copied().unwrap_or(DEFAULT_VOLUME),
            })
            .collect();

        SessionSummary {
            category: self.config.category,
            tracks,
            duration_label: format_duration(self.config.duration_seconds),
            alarm: self
                .config
                .alarm_label
                .clone()
                .filter(|label| shows_alarm_row(label)),
            remaining_label: format_duration(self.remaining_seconds),
            phase: self.phase,
            is_playing: self.is_playing(),
        }
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Plays, pauses or resumes depending on the current phase.
    ///
    /// Returns the phase after the toggle. If nothing could be played the
    /// phase is unchanged and a `PlaybackFailed` notice is queued.
    ///
    /// The countdown needs a tokio runtime. Outside one, playback still
    /// starts but time only advances through `tick`.
    pub fn toggle_playback(&mut self) -> PlaybackPhase {
        match self.phase {
            PlaybackPhase::Playing => {
                self.playback.pause();
                self.countdown.cancel();
                self.phase = PlaybackPhase::Paused;
                info!("Session paused at {}", format_duration(self.remaining_seconds));
            }
            PlaybackPhase::Paused => {
                self.playback.resume();
                self.countdown.start();
                self.phase = PlaybackPhase::Playing;
                info!("Session resumed at {}", format_duration(self.remaining_seconds));
            }
            PlaybackPhase::Ready | PlaybackPhase::Finished => self.start(),
        }
        self.phase
    }

    fn start(&mut self) {
        let mix = self.resolver.resolve_all(&self.config.sounds);
        if mix.tracks.is_empty() {
            self.fail(SoundError::NothingPlayable(self.config.sounds.len()));
            return;
        }

        let duration = self.config.duration_seconds;
        match self.playback.play(&mix.tracks, duration, &self.volumes) {
            Ok(report) => {
                let dropped = mix.failures.into_iter().chain(report.failures);
                for failure in dropped {
                    self.notices.push(SessionNotice::SoundDropped {
                        sound: failure.sound,
                        error: failure.error,
                    });
                }

                self.remaining_seconds = duration;
                self.phase = PlaybackPhase::Playing;
                self.countdown.start();
                info!(
                    "Session started: {} sound(s) for {}",
                    report.started.len(),
                    format_duration(duration)
                );
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: SoundError) {
        warn!("Unable to start session: {}", error);
        self.notices.push(SessionNotice::PlaybackFailed { error });
    }

    /// Stops playback and rewinds to the full duration.
    pub fn stop(&mut self) {
        self.playback.stop();
        self.countdown.cancel();
        self.remaining_seconds = self.config.duration_seconds;
        self.phase = PlaybackPhase::Ready;
        debug!("Session stopped");
    }

    /// Sets a sound's volume, returning the clamped level.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSound` if the sound is not in the session.
    pub fn set_volume(&mut self, sound: Sound, level: f32) -> Result<f32, SessionError> {
        let level = clamp_volume(level);
        let current = self
            .volumes
            .get_mut(&sound)
            .ok_or(SessionError::UnknownSound(sound))?;
        *current = level;
        self.playback.set_volume(sound, level);
        Ok(level)
    }

    // ========================================================================
    // Countdown
    // ========================================================================

    /// Counts one second down. Returns the remaining seconds, or `None` if
    /// the session is not playing.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.phase.is_playing() {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.playback.stop();
            self.countdown.cancel();
            self.phase = PlaybackPhase::Finished;
            info!("Session finished");
        }
        Some(self.remaining_seconds)
    }

    /// Applies a tick from the countdown, ignoring stale ones.
    pub fn handle_tick(&mut self, tick: CountdownTick) -> Option<u32> {
        if !self.countdown.accepts(tick) {
            debug!("Ignoring stale tick (epoch {})", tick.epoch);
            return None;
        }
        self.tick()
    }

    /// Waits for the next countdown tick.
    ///
    /// Pending forever while the countdown is not running.
    pub async fn next_tick(&mut self) -> Option<CountdownTick> {
        self.tick_rx.recv().await
    }

    /// Drains queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Returns the wizard step an edit request leads to.
    pub fn edit(&self, target: EditTarget) -> WizardStep {
        target.step()
    }

    /// Stops everything and hands back the backend and volumes.
    pub fn teardown(mut self) -> (P, BTreeMap<Sound, f32>) {
        self.stop();
        (self.playback, self.volumes)
    }
}

// ============================================================================
// Tests
// ============================================================================

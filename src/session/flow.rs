//! Wizard-to-summary coordinator.
//!
//! `SoundSessionFlow` owns the wizard and the playback backend. Reaching the
//! summary step presents a `SessionSummaryController` that borrows the
//! backend; editing from the summary tears it down and returns to the wizard
//! with the draft and the chosen volumes intact.

use std::collections::BTreeMap;

use tracing::debug;

use super::error::SessionError;
use super::summary::{SessionConfig, SessionSummaryController};
use crate::catalog::Sound;
use crate::sound::{AssetResolver, PlaybackSession};
use crate::types::WizardStep;
use crate::wizard::{EditTarget, SessionWizard, WizardAction};

/// Drives a session from category selection to playback.
#[derive(Debug)]
pub struct SoundSessionFlow<P: PlaybackSession> {
    wizard: SessionWizard,
    resolver: AssetResolver,
    /// Backend while no summary is shown
    parked: Option<P>,
    summary: Option<SessionSummaryController<P>>,
    volumes: BTreeMap<Sound, f32>,
}

impl<P: PlaybackSession> SoundSessionFlow<P> {
    /// Creates a flow starting on the category step.
    pub fn new(playback: P, resolver: AssetResolver) -> Self {
        Self::with_wizard(SessionWizard::new(), playback, resolver)
    }

    /// Creates a flow around an existing wizard.
    ///
    /// A wizard already on the summary step is presented on the next action
    /// that returns to it, or immediately via `present`.
    pub fn with_wizard(wizard: SessionWizard, playback: P, resolver: AssetResolver) -> Self {
        Self {
            wizard,
            resolver,
            parked: Some(playback),
            summary: None,
            volumes: BTreeMap::new(),
        }
    }

    /// Sets volumes to apply whenever a summary is presented.
    pub fn set_initial_volumes(&mut self, volumes: BTreeMap<Sound, f32>) {
        self.volumes = volumes;
    }

    pub fn wizard(&self) -> &SessionWizard {
        &self.wizard
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    /// Returns the presented summary, if any.
    pub fn summary(&self) -> Option<&SessionSummaryController<P>> {
        self.summary.as_ref()
    }

    pub fn summary_mut(&mut self) -> Option<&mut SessionSummaryController<P>> {
        self.summary.as_mut()
    }

    /// Applies a wizard action. Reaching the summary step presents it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Wizard` if the wizard rejects the action, or
    /// `SessionError::IncompleteDraft` if the summary cannot be presented.
    pub fn apply(&mut self, action: WizardAction) -> Result<WizardStep, SessionError> {
        if let WizardAction::Edit(target) = action {
            return self.edit(target);
        }

        let step = self.wizard.apply(action)?;
        if step == WizardStep::Summary {
            self.present()?;
        }
        Ok(step)
    }

    /// Presents the summary for the current draft if not already shown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteDraft` if the draft is incomplete.
    pub fn present(&mut self) -> Result<&mut SessionSummaryController<P>, SessionError> {
        if self.summary.is_none() {
            let config = SessionConfig::try_from(self.wizard.draft())?;
            if let Some(playback) = self.parked.take() {
                let controller =
                    SessionSummaryController::new(config, playback, self.resolver.clone())
                        .with_volumes(&self.volumes);
                self.summary = Some(controller);
            }
        }

        self.summary
            .as_mut()
            .ok_or(SessionError::IncompleteDraft("playback"))
    }

    /// Leaves the summary to edit one of its fields.
    ///
    /// Playback stops; the draft and volumes carry over to the next summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Wizard` if the wizard is not on the summary step.
    pub fn edit(&mut self, target: EditTarget) -> Result<WizardStep, SessionError> {
        let step = self.wizard.edit(target)?;

        if let Some(controller) = self.summary.take() {
            let (playback, volumes) = controller.teardown();
            self.parked = Some(playback);
            self.volumes.extend(volumes);
            debug!("Summary closed to edit {:?}", target);
        }
        Ok(step)
    }

    /// Stops any playback and returns the backend.
    pub fn close(mut self) -> Option<P> {
        match self.summary.take() {
            Some(controller) => Some(controller.teardown().0),
            None => self.parked.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SoundCategory;
    use crate::sound::{MockPlaybackSession, PlaybackCall, ToneSynth};
    use crate::types::{PlaybackPhase, NO_ALARM};
    use crate::wizard::WizardError;
    use tempfile::TempDir;

    fn create_flow(dir: &TempDir) -> SoundSessionFlow<MockPlaybackSession> {
        let resolver = AssetResolver::new(None, None, ToneSynth::new(dir.path().join("tones")));
        SoundSessionFlow::new(MockPlaybackSession::new(), resolver)
    }

    fn walk_to_summary(flow: &mut SoundSessionFlow<MockPlaybackSession>) {
        let actions = [
            WizardAction::SelectCategory(SoundCategory::Pink),
            WizardAction::ToggleSound(Sound::Rain),
            WizardAction::ToggleSound(Sound::Ocean),
            WizardAction::Continue,
            WizardAction::SelectDuration(1800),
            WizardAction::SelectAlarm(NO_ALARM.to_string()),
        ];
        for action in actions {
            flow.apply(action).unwrap();
        }
    }

    #[test]
    fn test_reaching_summary_presents_controller() {
        let dir = TempDir::new().unwrap();
        let mut flow = create_flow(&dir);
        assert!(flow.summary().is_none());

        walk_to_summary(&mut flow);
        assert_eq!(flow.step(), WizardStep::Summary);

        let summary = flow.summary().unwrap().summary();
        assert_eq!(summary.tracks.len(), 2);
        assert_eq!(summary.duration_label, "30:00");
        assert_eq!(summary.alarm, None);
        assert_eq!(summary.phase, PlaybackPhase::Ready);
    }

    #[test]
    fn test_rejected_action_surfaces_wizard_error() {
        let dir = TempDir::new().unwrap();
        let mut flow = create_flow(&dir);

        let err = flow.apply(WizardAction::SelectDuration(60)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Wizard(WizardError::InvalidAction { .. })
        ));
        assert_eq!(flow.step(), WizardStep::Category);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_stops_playback_and_keeps_volumes() {
        let dir = TempDir::new().unwrap();
        let mut flow = create_flow(&dir);
        walk_to_summary(&mut flow);

        let controller = flow.summary_mut().unwrap();
        controller.set_volume(Sound::Rain, 0.9).unwrap();
        controller.toggle_playback();
        assert!(controller.is_playing());

        let step = flow.apply(WizardAction::Edit(EditTarget::Duration)).unwrap();
        assert_eq!(step, WizardStep::Duration);
        assert!(flow.summary().is_none());

        flow.apply(WizardAction::SelectDuration(900)).unwrap();
        let step = flow
            .apply(WizardAction::SelectAlarm("Soft Bells".to_string()))
            .unwrap();
        assert_eq!(step, WizardStep::Summary);

        let controller = flow.summary().unwrap();
        assert_eq!(controller.volume(Sound::Rain), Some(0.9));
        assert_eq!(controller.volume(Sound::Ocean), Some(0.5));
        assert_eq!(controller.phase(), PlaybackPhase::Ready);
        assert_eq!(controller.summary().duration_label, "15:00");
        assert_eq!(controller.summary().alarm.as_deref(), Some("Soft Bells"));
        assert!(!controller.playback().is_playing());
        assert!(controller.playback().calls().contains(&PlaybackCall::Stop));
    }

    #[test]
    fn test_edit_outside_summary_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut flow = create_flow(&dir);

        let err = flow.edit(EditTarget::Sounds).unwrap_err();
        assert!(matches!(err, SessionError::Wizard(_)));
        assert_eq!(flow.step(), WizardStep::Category);
    }

    #[test]
    fn test_initial_volumes_applied_on_present() {
        let dir = TempDir::new().unwrap();
        let mut flow = create_flow(&dir);
        let mut volumes = BTreeMap::new();
        volumes.insert(Sound::Ocean, 0.2);
        flow.set_initial_volumes(volumes);

        walk_to_summary(&mut flow);
        assert_eq!(flow.summary().unwrap().volume(Sound::Ocean), Some(0.2));
    }

    #[test]
    fn test_incomplete_resumed_draft_is_not_presented() {
        let dir = TempDir::new().unwrap();
        let resolver = AssetResolver::new(None, None, ToneSynth::new(dir.path()));
        let wizard = SessionWizard::resume(Default::default(), WizardStep::Summary);
        let mut flow = SoundSessionFlow::with_wizard(wizard, MockPlaybackSession::new(), resolver);

        assert_eq!(
            flow.present().err(),
            Some(SessionError::IncompleteDraft("category"))
        );
        assert!(flow.close().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_returns_stopped_backend() {
        let dir = TempDir::new().unwrap();
        let mut flow = create_flow(&dir);
        walk_to_summary(&mut flow);
        flow.summary_mut().unwrap().toggle_playback();

        let playback = flow.close().unwrap();
        assert!(!playback.is_playing());
    }
}

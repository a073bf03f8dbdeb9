//! Session wizard state machine.
//!
//! The wizard walks the user through building a sound session:
//!
//! ```text
//! Category ──select──▶ Sound ──continue──▶ Duration ──select──▶ Alarm ──select──▶ Summary
//!    ▲                   │ ▲                  ▲                   ▲                 │
//!    └──────back─────────┘ └──────────────────┴───── edit ────────┴─────────────────┘
//! ```
//!
//! Every choice is also the navigation action, except on the sound step
//! where sounds are toggled and `continue` advances. `continue` with nothing
//! selected keeps the wizard on the sound step.
//!
//! Changing the category does not clear already selected sounds; mixing
//! sounds from several categories is allowed.

mod error;

use tracing::debug;

use crate::catalog::{sounds_for, Sound, SoundCategory};
use crate::types::{SessionDraft, WizardStep};

pub use error::WizardError;

// ============================================================================
// WizardAction
// ============================================================================

/// A user action applied to the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Choose a category (Category step)
    SelectCategory(SoundCategory),
    /// Show another category's sounds without changing the draft (Sound step)
    BrowseCategory(SoundCategory),
    /// Add or remove a sound (Sound step)
    ToggleSound(Sound),
    /// Advance past sound selection (Sound step)
    Continue,
    /// Return to category selection (Sound step)
    Back,
    /// Choose a duration in seconds (Duration step)
    SelectDuration(u32),
    /// Choose an alarm label (Alarm step)
    SelectAlarm(String),
    /// Jump back to an earlier step (Summary step)
    Edit(EditTarget),
}

impl WizardAction {
    /// Returns the action name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            WizardAction::SelectCategory(_) => "select_category",
            WizardAction::BrowseCategory(_) => "browse_category",
            WizardAction::ToggleSound(_) => "toggle_sound",
            WizardAction::Continue => "continue",
            WizardAction::Back => "back",
            WizardAction::SelectDuration(_) => "select_duration",
            WizardAction::SelectAlarm(_) => "select_alarm",
            WizardAction::Edit(EditTarget::Sounds) => "edit_sounds",
            WizardAction::Edit(EditTarget::Duration) => "edit_duration",
            WizardAction::Edit(EditTarget::Alarm) => "edit_alarm",
        }
    }
}

/// Summary fields that can be edited by jumping back into the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Sounds,
    Duration,
    Alarm,
}

impl EditTarget {
    /// Returns the wizard step that edits this field.
    pub fn step(&self) -> WizardStep {
        match self {
            EditTarget::Sounds => WizardStep::Sound,
            EditTarget::Duration => WizardStep::Duration,
            EditTarget::Alarm => WizardStep::Alarm,
        }
    }
}

// ============================================================================
// SessionWizard
// ============================================================================

/// Step state machine that owns the session draft.
#[derive(Debug, Clone, Default)]
pub struct SessionWizard {
    step: WizardStep,
    draft: SessionDraft,
    /// Category whose sounds are listed on the sound step
    browsing: Option<SoundCategory>,
}

impl SessionWizard {
    /// Creates a wizard on the category step with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a wizard from a saved draft at the given step.
    pub fn resume(draft: SessionDraft, step: WizardStep) -> Self {
        Self {
            step,
            browsing: draft.category,
            draft,
        }
    }

    /// Returns the current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Returns the draft.
    pub fn draft(&self) -> &SessionDraft {
        &self.draft
    }

    /// Returns the category whose sounds are currently listed.
    pub fn visible_category(&self) -> Option<SoundCategory> {
        self.browsing.or(self.draft.category)
    }

    /// Returns the sounds listed on the sound step.
    pub fn available_sounds(&self) -> &'static [Sound] {
        self.visible_category().map(sounds_for).unwrap_or(&[])
    }

    /// Returns true if `continue` would leave the sound step.
    pub fn can_continue(&self) -> bool {
        self.step == WizardStep::Sound && !self.draft.sounds.is_empty()
    }

    /// Applies an action and returns the resulting step.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::InvalidAction` if the action has no transition
    /// from the current step, or `WizardError::InvalidDuration` for a zero
    /// duration. The wizard is unchanged on error.
    pub fn apply(&mut self, action: WizardAction) -> Result<WizardStep, WizardError> {
        let from = self.step;
        let to = match (from, action) {
            (WizardStep::Category, WizardAction::SelectCategory(category)) => {
                self.draft.category = Some(category);
                self.browsing = Some(category);
                WizardStep::Sound
            }
            (WizardStep::Sound, WizardAction::BrowseCategory(category)) => {
                self.browsing = Some(category);
                WizardStep::Sound
            }
            (WizardStep::Sound, WizardAction::ToggleSound(sound)) => {
                let selected = self.draft.toggle_sound(sound);
                debug!("Toggled {}: selected={}", sound, selected);
                WizardStep::Sound
            }
            (WizardStep::Sound, WizardAction::Continue) => {
                if self.draft.sounds.is_empty() {
                    debug!("Continue ignored: no sounds selected");
                    WizardStep::Sound
                } else {
                    WizardStep::Duration
                }
            }
            (WizardStep::Sound, WizardAction::Back) => WizardStep::Category,
            (WizardStep::Duration, WizardAction::SelectDuration(seconds)) => {
                if seconds == 0 {
                    return Err(WizardError::InvalidDuration);
                }
                self.draft.duration_seconds = Some(seconds);
                WizardStep::Alarm
            }
            (WizardStep::Alarm, WizardAction::SelectAlarm(label)) => {
                self.draft.alarm_label = Some(label);
                WizardStep::Summary
            }
            (WizardStep::Summary, WizardAction::Edit(target)) => {
                self.browsing = self.draft.category;
                target.step()
            }
            (step, action) => {
                return Err(WizardError::InvalidAction {
                    step,
                    action: action.name(),
                });
            }
        };

        if from != to {
            debug!("Wizard step {} -> {}", from, to);
        }
        self.step = to;
        Ok(to)
    }

    /// Chooses a category and moves to the sound step.
    pub fn select_category(&mut self, category: SoundCategory) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::SelectCategory(category))
    }

    /// Lists another category's sounds on the sound step.
    pub fn browse_category(&mut self, category: SoundCategory) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::BrowseCategory(category))
    }

    /// Toggles a sound. Returns true if the sound is now selected.
    pub fn toggle_sound(&mut self, sound: Sound) -> Result<bool, WizardError> {
        self.apply(WizardAction::ToggleSound(sound))?;
        Ok(self.draft.contains(sound))
    }

    /// Advances to the duration step if at least one sound is selected.
    pub fn continue_to_duration(&mut self) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::Continue)
    }

    /// Returns from the sound step to the category step.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::Back)
    }

    /// Chooses a duration and moves to the alarm step.
    pub fn select_duration(&mut self, seconds: u32) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::SelectDuration(seconds))
    }

    /// Chooses an alarm and moves to the summary step.
    pub fn select_alarm(&mut self, label: impl Into<String>) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::SelectAlarm(label.into()))
    }

    /// Jumps from the summary to the step that edits `target`.
    pub fn edit(&mut self, target: EditTarget) -> Result<WizardStep, WizardError> {
        self.apply(WizardAction::Edit(target))
    }

    pub fn edit_sounds(&mut self) -> Result<WizardStep, WizardError> {
        self.edit(EditTarget::Sounds)
    }

    pub fn edit_duration(&mut self) -> Result<WizardStep, WizardError> {
        self.edit(EditTarget::Duration)
    }

    pub fn edit_alarm(&mut self) -> Result<WizardStep, WizardError> {
        self.edit(EditTarget::Alarm)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NO_ALARM;

    fn wizard_at_summary() -> SessionWizard {
        let mut wizard = SessionWizard::new();
        wizard.select_category(SoundCategory::Pink).unwrap();
        wizard.toggle_sound(Sound::Rain).unwrap();
        wizard.toggle_sound(Sound::Ocean).unwrap();
        wizard.continue_to_duration().unwrap();
        wizard.select_duration(1800).unwrap();
        wizard.select_alarm("Birdsong").unwrap();
        wizard
    }

    mod transition_tests {
        use super::*;

        #[test]
        fn test_new_wizard() {
            let wizard = SessionWizard::new();
            assert_eq!(wizard.step(), WizardStep::Category);
            assert_eq!(wizard.draft(), &SessionDraft::new());
            assert!(wizard.available_sounds().is_empty());
        }

        #[test]
        fn test_full_forward_path() {
            let wizard = wizard_at_summary();
            assert_eq!(wizard.step(), WizardStep::Summary);

            let draft = wizard.draft();
            assert_eq!(draft.category, Some(SoundCategory::Pink));
            assert_eq!(draft.sounds, vec![Sound::Rain, Sound::Ocean]);
            assert_eq!(draft.duration_seconds, Some(1800));
            assert_eq!(draft.alarm_label.as_deref(), Some("Birdsong"));
        }

        #[test]
        fn test_select_category_moves_to_sound() {
            let mut wizard = SessionWizard::new();
            let step = wizard.select_category(SoundCategory::Nature).unwrap();
            assert_eq!(step, WizardStep::Sound);
            assert_eq!(wizard.available_sounds(), sounds_for(SoundCategory::Nature));
        }

        #[test]
        fn test_toggle_stays_on_sound() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::White).unwrap();

            assert!(wizard.toggle_sound(Sound::Fan).unwrap());
            assert_eq!(wizard.step(), WizardStep::Sound);
            assert!(!wizard.toggle_sound(Sound::Fan).unwrap());
            assert_eq!(wizard.step(), WizardStep::Sound);
        }

        #[test]
        fn test_continue_without_sounds_is_noop() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::White).unwrap();

            assert!(!wizard.can_continue());
            assert_eq!(wizard.continue_to_duration().unwrap(), WizardStep::Sound);
            assert_eq!(wizard.step(), WizardStep::Sound);
        }

        #[test]
        fn test_continue_with_any_selection_advances() {
            for sound in Sound::ALL {
                let mut wizard = SessionWizard::new();
                wizard.select_category(sound.category()).unwrap();
                wizard.toggle_sound(sound).unwrap();
                assert!(wizard.can_continue());
                assert_eq!(wizard.continue_to_duration().unwrap(), WizardStep::Duration);
            }
        }

        #[test]
        fn test_back_returns_to_category_keeping_sounds() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::Pink).unwrap();
            wizard.toggle_sound(Sound::Rain).unwrap();

            assert_eq!(wizard.back().unwrap(), WizardStep::Category);
            assert_eq!(wizard.draft().sounds, vec![Sound::Rain]);
        }

        #[test]
        fn test_reselecting_category_keeps_sounds() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::Pink).unwrap();
            wizard.toggle_sound(Sound::Rain).unwrap();
            wizard.back().unwrap();

            wizard.select_category(SoundCategory::Pink).unwrap();
            assert_eq!(wizard.draft().sounds, vec![Sound::Rain]);

            wizard.back().unwrap();
            wizard.select_category(SoundCategory::Brown).unwrap();
            assert_eq!(wizard.draft().sounds, vec![Sound::Rain]);
            assert_eq!(wizard.draft().category, Some(SoundCategory::Brown));
        }

        #[test]
        fn test_zero_duration_rejected() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::Pink).unwrap();
            wizard.toggle_sound(Sound::Rain).unwrap();
            wizard.continue_to_duration().unwrap();

            assert_eq!(wizard.select_duration(0), Err(WizardError::InvalidDuration));
            assert_eq!(wizard.step(), WizardStep::Duration);
            assert!(wizard.draft().duration_seconds.is_none());
        }

        #[test]
        fn test_no_alarm_is_a_choice() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::Pink).unwrap();
            wizard.toggle_sound(Sound::Rain).unwrap();
            wizard.continue_to_duration().unwrap();
            wizard.select_duration(3600).unwrap();

            assert_eq!(wizard.select_alarm(NO_ALARM).unwrap(), WizardStep::Summary);
            assert_eq!(wizard.draft().alarm_label.as_deref(), Some(NO_ALARM));
        }

        #[test]
        fn test_invalid_actions_leave_state_untouched() {
            let mut wizard = SessionWizard::new();
            let before = wizard.draft().clone();

            let err = wizard.select_duration(1800).unwrap_err();
            assert_eq!(
                err,
                WizardError::InvalidAction {
                    step: WizardStep::Category,
                    action: "select_duration"
                }
            );
            assert!(wizard.toggle_sound(Sound::Rain).is_err());
            assert!(wizard.edit_sounds().is_err());
            assert!(wizard.back().is_err());
            assert_eq!(wizard.step(), WizardStep::Category);
            assert_eq!(wizard.draft(), &before);
        }

        #[test]
        fn test_category_not_selectable_from_summary() {
            let mut wizard = wizard_at_summary();
            assert!(wizard.select_category(SoundCategory::White).is_err());
            assert_eq!(wizard.step(), WizardStep::Summary);
        }
    }

    mod browse_tests {
        use super::*;

        #[test]
        fn test_browse_changes_listing_only() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::Pink).unwrap();
            wizard.toggle_sound(Sound::Rain).unwrap();

            wizard.browse_category(SoundCategory::Nature).unwrap();
            assert_eq!(wizard.available_sounds(), sounds_for(SoundCategory::Nature));
            assert_eq!(wizard.draft().category, Some(SoundCategory::Pink));

            wizard.toggle_sound(Sound::Birds).unwrap();
            assert_eq!(wizard.draft().sounds, vec![Sound::Rain, Sound::Birds]);
        }

        #[test]
        fn test_browse_only_on_sound_step() {
            let mut wizard = SessionWizard::new();
            assert!(wizard.browse_category(SoundCategory::Nature).is_err());
        }
    }

    mod edit_tests {
        use super::*;

        #[test]
        fn test_edit_targets() {
            let mut wizard = wizard_at_summary();
            assert_eq!(wizard.edit_sounds().unwrap(), WizardStep::Sound);

            let mut wizard = wizard_at_summary();
            assert_eq!(wizard.edit_duration().unwrap(), WizardStep::Duration);

            let mut wizard = wizard_at_summary();
            assert_eq!(wizard.edit_alarm().unwrap(), WizardStep::Alarm);
        }

        #[test]
        fn test_edit_sounds_round_trip_preserves_untouched_fields() {
            let mut wizard = wizard_at_summary();

            wizard.edit_sounds().unwrap();
            assert_eq!(wizard.draft().alarm_label.as_deref(), Some("Birdsong"));
            assert_eq!(wizard.draft().duration_seconds, Some(1800));

            wizard.toggle_sound(Sound::Wind).unwrap();
            wizard.continue_to_duration().unwrap();
            assert_eq!(wizard.draft().alarm_label.as_deref(), Some("Birdsong"));

            wizard.select_duration(1800).unwrap();
            assert_eq!(wizard.draft().alarm_label.as_deref(), Some("Birdsong"));

            wizard.select_alarm("Birdsong").unwrap();
            assert_eq!(wizard.step(), WizardStep::Summary);
            assert_eq!(
                wizard.draft().sounds,
                vec![Sound::Rain, Sound::Ocean, Sound::Wind]
            );
            assert_eq!(wizard.draft().category, Some(SoundCategory::Pink));
        }

        #[test]
        fn test_edit_duration_preserves_sounds_and_alarm() {
            let mut wizard = wizard_at_summary();
            wizard.edit_duration().unwrap();
            wizard.select_duration(7200).unwrap();

            assert_eq!(wizard.step(), WizardStep::Alarm);
            assert_eq!(wizard.draft().duration_seconds, Some(7200));
            assert_eq!(wizard.draft().sounds, vec![Sound::Rain, Sound::Ocean]);
            assert_eq!(wizard.draft().alarm_label.as_deref(), Some("Birdsong"));
        }

        #[test]
        fn test_edit_resets_browsing_to_draft_category() {
            let mut wizard = SessionWizard::new();
            wizard.select_category(SoundCategory::Pink).unwrap();
            wizard.browse_category(SoundCategory::Brown).unwrap();
            wizard.toggle_sound(Sound::Thunder).unwrap();
            wizard.continue_to_duration().unwrap();
            wizard.select_duration(1800).unwrap();
            wizard.select_alarm(NO_ALARM).unwrap();

            wizard.edit_sounds().unwrap();
            assert_eq!(wizard.visible_category(), Some(SoundCategory::Pink));
        }

        #[test]
        fn test_resume_from_saved_draft() {
            let saved = wizard_at_summary().draft().clone();
            let mut wizard = SessionWizard::resume(saved.clone(), WizardStep::Summary);
            assert_eq!(wizard.draft(), &saved);
            assert_eq!(wizard.edit_alarm().unwrap(), WizardStep::Alarm);
        }
    }

    mod toggle_property_tests {
        use super::*;

        /// Deterministic pseudo-random walk over toggles.
        fn toggle_sequence(seed: u64, len: usize) -> Vec<Sound> {
            let mut state = seed;
            (0..len)
                .map(|_| {
                    state = state
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    Sound::ALL[(state >> 33) as usize % Sound::ALL.len()]
                })
                .collect()
        }

        #[test]
        fn test_toggles_never_duplicate() {
            for seed in 0..50 {
                let mut wizard = SessionWizard::new();
                wizard.select_category(SoundCategory::White).unwrap();
                for sound in toggle_sequence(seed, 200) {
                    wizard.toggle_sound(sound).unwrap();
                    let sounds = &wizard.draft().sounds;
                    let mut deduped = sounds.clone();
                    deduped.sort();
                    deduped.dedup();
                    assert_eq!(deduped.len(), sounds.len());
                }
            }
        }

        #[test]
        fn test_double_toggle_keeps_relative_order() {
            for seed in 0..50 {
                let mut wizard = SessionWizard::new();
                wizard.select_category(SoundCategory::White).unwrap();
                for sound in toggle_sequence(seed, 30) {
                    wizard.toggle_sound(sound).unwrap();
                }
                let before = wizard.draft().sounds.clone();
                let Some(&target) = before.first() else {
                    continue;
                };

                wizard.toggle_sound(target).unwrap();
                wizard.toggle_sound(target).unwrap();

                let mut expected: Vec<Sound> =
                    before.iter().copied().filter(|s| *s != target).collect();
                expected.push(target);
                assert_eq!(wizard.draft().sounds, expected);
            }
        }
    }
}

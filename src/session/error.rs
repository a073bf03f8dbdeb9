//! Session error and notice types.

use thiserror::Error;

use crate::catalog::Sound;
use crate::sound::SoundError;
use crate::wizard::WizardError;

/// Errors returned by the session summary and flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The draft is missing a choice the summary needs.
    #[error("session is incomplete: no {0} chosen")]
    IncompleteDraft(&'static str),

    /// The sound is not part of this session.
    #[error("{0} is not part of this session")]
    UnknownSound(Sound),

    /// A wizard action was rejected.
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// A user-facing message raised while playing a session.
///
/// Notices never end the session; they are queued on the controller and
/// drained by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// One sound was left out of the mix. The rest keep playing.
    SoundDropped { sound: Sound, error: SoundError },
    /// Nothing could be played.
    PlaybackFailed { error: SoundError },
}

impl SessionNotice {
    /// Returns true for notices that stopped playback from starting.
    pub fn is_error(&self) -> bool {
        matches!(self, SessionNotice::PlaybackFailed { .. })
    }

    /// Returns the message to show the user.
    pub fn message(&self) -> String {
        match self {
            SessionNotice::SoundDropped { sound, error } => {
                format!("{} was skipped: {}", sound.display_name(), error)
            }
            SessionNotice::PlaybackFailed { error } => {
                format!("Unable to start the session: {}", error)
            }
        }
    }

    /// Returns a hint for resolving the problem.
    pub fn suggestion(&self) -> &'static str {
        match self {
            SessionNotice::SoundDropped { error, .. } | SessionNotice::PlaybackFailed { error } => {
                error.suggestion()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SessionError::IncompleteDraft("duration").to_string(),
            "session is incomplete: no duration chosen"
        );
        assert!(SessionError::UnknownSound(Sound::Rain)
            .to_string()
            .contains("Rain"));

        let wrapped: SessionError = WizardError::InvalidDuration.into();
        assert_eq!(wrapped.to_string(), WizardError::InvalidDuration.to_string());
    }

    #[test]
    fn test_notice_severity() {
        let dropped = SessionNotice::SoundDropped {
            sound: Sound::Ocean,
            error: SoundError::ToneGenerationFailed("disk full".to_string()),
        };
        assert!(!dropped.is_error());
        assert!(dropped.message().starts_with("Ocean was skipped"));
        assert!(!dropped.suggestion().is_empty());

        let failed = SessionNotice::PlaybackFailed {
            error: SoundError::NothingPlayable(2),
        };
        assert!(failed.is_error());
        assert!(failed.message().contains("none of the 2 selected sounds"));
    }
}

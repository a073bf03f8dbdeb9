//! Drowsii Library
//!
//! This library provides the core of the Drowsii sleep-sound app.
//! It includes:
//! - The sound catalog (categories, sounds, icons, display names)
//! - The session wizard that builds a session draft step by step
//! - The session summary controller with playback, countdown and volumes
//! - Sound playback with bundled, custom and synthesized sources
//! - The sleep-habits quiz and personalized recommendations
//! - Persisted settings and application configuration
//! - CLI command parsing and display utilities

pub mod catalog;
pub mod cli;
pub mod config;
pub mod quiz;
pub mod recommendation;
pub mod session;
pub mod sound;
pub mod store;
pub mod types;
pub mod wizard;

// Re-export commonly used types for convenience
pub use types::{
    format_duration, PlaybackPhase, PlaybackState, SessionDraft, WizardStep, ALARM_OPTIONS,
    DEFAULT_VOLUME, DURATION_OPTIONS, NO_ALARM,
};

pub use catalog::{category_of, display_name, icon_for, sounds_for, Sound, SoundCategory};

pub use wizard::{EditTarget, SessionWizard, WizardAction, WizardError};

pub use session::{
    SessionError, SessionNotice, SessionSummary, SessionSummaryController, SoundSessionFlow,
};

// Re-export sound types
pub use sound::{
    AssetResolver, AudioSource, MockPlaybackSession, PlaybackSession, RodioPlaybackSession,
    SoundError, ToneSynth,
};

pub use quiz::{QuizError, QuizEvent, SleepQuiz};

pub use recommendation::{
    MockRecommendationService, RecommendationError, RecommendationFetcher,
    RecommendationResponse, RecommendationService, RetryPolicy,
};

pub use config::{AppConfig, ConfigError};
pub use store::{SettingsStore, StoreError};

//! Personalized sleep recommendations.
//!
//! A `RecommendationService` turns quiz answers into JSON text. The
//! `RecommendationFetcher` retries failed calls, decodes the response and
//! caches it in the settings store, keyed by a hash of the answers, so the
//! service is only asked again when the answers change.
//!
//! Response shape:
//!
//! ```json
//! {
//!   "recommendedSound": {
//!     "soundCategory": "Pink Noise",
//!     "exampleSounds": ["rain", "wind"],
//!     "reason": "..."
//!   },
//!   "additionalTips": [{ "tip": "...", "category": "Routine" }]
//! }
//! ```

mod error;
mod retry;

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::RecommendationError;
pub use retry::{RetryPolicy, DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS};

use crate::catalog::SoundCategory;
use crate::store::SettingsStore;

// ============================================================================
// Response types
// ============================================================================

/// A decoded recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommended_sound: RecommendedSound,
    #[serde(default)]
    pub additional_tips: Vec<AdditionalTip>,
}

/// The sound category the user should try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSound {
    pub sound_category: String,
    #[serde(default)]
    pub example_sounds: Vec<String>,
    pub reason: String,
}

impl RecommendedSound {
    /// Maps the free-form category name onto a catalog category.
    ///
    /// Accepts labels such as "Pink Noise", "pink" or "Nature Sounds".
    pub fn category(&self) -> Option<SoundCategory> {
        let name = self.sound_category.trim();
        SoundCategory::from_label(name).or_else(|| {
            let first = name.split_whitespace().next()?.to_ascii_lowercase();
            SoundCategory::ALL
                .into_iter()
                .find(|category| category.label().to_ascii_lowercase().starts_with(&first))
        })
    }
}

/// A general sleep-hygiene tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalTip {
    pub tip: String,
    pub category: String,
}

/// Decodes service output into a recommendation.
///
/// # Errors
///
/// Returns `RecommendationError::EmptyResponse` for blank text and
/// `RecommendationError::Decode` for malformed JSON.
pub fn decode_response(text: &str) -> Result<RecommendationResponse, RecommendationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RecommendationError::EmptyResponse);
    }
    Ok(serde_json::from_str(text)?)
}

/// Hash identifying a set of quiz answers.
pub fn answers_hash(answers: &[usize]) -> u64 {
    let mut hasher = DefaultHasher::new();
    answers.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Service
// ============================================================================

/// Trait for the remote recommendation source.
///
/// Implementations return the raw JSON text; decoding and retries are done
/// by `RecommendationFetcher`.
#[allow(async_fn_in_trait)]
pub trait RecommendationService {
    async fn recommend(&self, answers: &[usize]) -> Result<String, RecommendationError>;
}

/// Mock recommendation service for testing.
///
/// Replies are served in the order they were queued; an empty queue fails.
#[derive(Debug, Default)]
pub struct MockRecommendationService {
    replies: Mutex<VecDeque<Result<String, RecommendationError>>>,
    calls: AtomicUsize,
}

impl MockRecommendationService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.queue(Ok(text.into()));
    }

    pub fn push_error(&self, error: RecommendationError) {
        self.queue(Err(error));
    }

    fn queue(&self, reply: Result<String, RecommendationError>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecommendationService for MockRecommendationService {
    async fn recommend(&self, _answers: &[usize]) -> Result<String, RecommendationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(RecommendationError::Service("no reply queued".to_string())))
    }
}

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches recommendations with retries and answer-keyed caching.
#[derive(Debug)]
pub struct RecommendationFetcher<S> {
    service: S,
    store: Arc<SettingsStore>,
    policy: RetryPolicy,
}

impl<S: RecommendationService> RecommendationFetcher<S> {
    pub fn new(service: S, store: Arc<SettingsStore>, policy: RetryPolicy) -> Self {
        Self {
            service,
            store,
            policy,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Returns the cached recommendation for `answers`, fetching it if the
    /// answers changed since the last fetch.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error if every attempt fails.
    pub async fn fetch(
        &self,
        answers: &[usize],
    ) -> Result<RecommendationResponse, RecommendationError> {
        if let Some(cached) = self.store.cached_recommendation(answers_hash(answers)) {
            debug!("Using cached recommendation");
            return Ok(cached);
        }
        self.refresh(answers).await
    }

    /// Fetches a new recommendation, ignoring the cache.
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError::NoAnswers` for an empty answer list, or
    /// the last attempt's error if every attempt fails.
    pub async fn refresh(
        &self,
        answers: &[usize],
    ) -> Result<RecommendationResponse, RecommendationError> {
        if answers.is_empty() {
            return Err(RecommendationError::NoAnswers);
        }

        let service = &self.service;
        let response = self
            .policy
            .run_while(
                "Recommendation request",
                |_| async move {
                    let text = service.recommend(answers).await?;
                    decode_response(&text)
                },
                RecommendationError::is_retryable,
            )
            .await?;

        if let Err(e) = self
            .store
            .cache_recommendation(answers_hash(answers), &response)
        {
            warn!("Failed to cache recommendation: {}", e);
        }
        Ok(response)
    }
}

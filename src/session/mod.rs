//! Session playback and countdown.
//!
//! - `summary`: the controller behind the summary screen
//! - `flow`: wizard/summary coordination
//! - `countdown`: the one-second ticker

pub mod countdown;
mod error;
pub mod flow;
pub mod summary;

pub use countdown::{Countdown, CountdownTick, TICK_INTERVAL};
pub use error::{SessionError, SessionNotice};
pub use flow::SoundSessionFlow;
pub use summary::{SessionConfig, SessionSummary, SessionSummaryController, TrackRow};

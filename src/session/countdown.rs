//! Cancellable one-second countdown ticker.
//!
//! The countdown runs as a tokio task that sends a `CountdownTick` every
//! second. Each start/cancel bumps an epoch, and ticks carry the epoch they
//! were produced under, so a tick already queued when playback is paused or
//! stopped is recognised as stale and ignored.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Period between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One elapsed countdown period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    /// Epoch of the countdown run that produced this tick
    pub epoch: u64,
}

/// Owner of the ticking task.
#[derive(Debug)]
pub struct Countdown {
    tick_tx: mpsc::UnboundedSender<CountdownTick>,
    task: Option<JoinHandle<()>>,
    epoch: u64,
    period: Duration,
}

impl Countdown {
    /// Creates a stopped countdown that will send ticks to `tick_tx`.
    pub fn new(tick_tx: mpsc::UnboundedSender<CountdownTick>) -> Self {
        Self::with_period(tick_tx, TICK_INTERVAL)
    }

    /// Creates a stopped countdown with a custom period.
    pub fn with_period(tick_tx: mpsc::UnboundedSender<CountdownTick>, period: Duration) -> Self {
        Self {
            tick_tx,
            task: None,
            epoch: 0,
            period,
        }
    }

    /// Starts ticking, replacing any run in progress.
    ///
    /// The first tick arrives one period after this call. Outside a tokio
    /// runtime nothing is spawned, the countdown stays stopped and `false`
    /// is returned.
    pub fn start(&mut self) -> bool {
        self.cancel();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Countdown not started: {}", e);
                return false;
            }
        };

        let epoch = self.epoch;
        let period = self.period;
        let tick_tx = self.tick_tx.clone();
        self.task = Some(handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tick_tx.send(CountdownTick { epoch }).is_err() {
                    break;
                }
            }
        }));

        debug!("Countdown started (epoch {})", epoch);
        true
    }

    /// Stops ticking. Ticks already queued become stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Countdown cancelled (epoch {})", self.epoch);
        }
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Returns true while a run is active.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Returns true if `tick` belongs to the active run.
    pub fn accepts(&self, tick: CountdownTick) -> bool {
        self.is_running() && tick.epoch == self.epoch
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! Liveness watchdog over an async record source.
//!
//! [`Watchdog`] merges a channel with a periodic timer. Each tick checks
//! whether anything arrived since the previous tick; if not, the source is
//! reported [`Watch::Silent`]. Records take priority over a tick that becomes
//! ready at the same time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Upper bound for the period and the grace, keeping `Instant` arithmetic in
/// range.
const MAX_WAIT: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Outcome of waiting on a [`Watchdog`].
#[derive(Debug, PartialEq, Eq)]
pub enum Watch<T> {
    /// The next item from the source.
    Item(T),
    /// The source is closed and fully drained.
    Closed,
    /// Nothing arrived for a whole check period. Carries the time since the
    /// last item (or since the watchdog started).
    Silent(Duration),
}

/// A channel receiver guarded by a liveness timer.
#[derive(Debug)]
pub struct Watchdog<T> {
    source: mpsc::Receiver<T>,
    ticker: Interval,
    received: bool,
    last_seen: Instant,
}

impl<T> Watchdog<T> {
    /// Guard `source`, checking every `period` after an initial `grace`.
    ///
    /// `period` is clamped to at least one millisecond. Both durations are
    /// capped at thirty years, so `Duration::MAX` effectively disables the
    /// check.
    pub fn new(source: mpsc::Receiver<T>, period: Duration, grace: Duration) -> Self {
        let now = Instant::now();
        let period = period.clamp(Duration::from_millis(1), MAX_WAIT);
        let start = now + grace.min(MAX_WAIT);
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            source,
            ticker,
            received: false,
            last_seen: now,
        }
    }

    /// Wait for the next item, the end of the source, or a silent period.
    ///
    /// Cancel safe: dropping the future loses no item.
    pub async fn next(&mut self) -> Watch<T> {
        loop {
            tokio::select! {
                biased;

                item = self.source.recv() => {
                    return match item {
                        Some(item) => {
                            self.received = true;
                            self.last_seen = Instant::now();
                            Watch::Item(item)
                        }
                        None => Watch::Closed,
                    };
                }
                _ = self.ticker.tick() => {
                    if !self.received {
                        return Watch::Silent(self.last_seen.elapsed());
                    }
                    self.received = false;
                }
            }
        }
    }

    /// Time of the most recent item (or of construction).
    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }
}

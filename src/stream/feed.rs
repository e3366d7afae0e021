//! Feed controller: runs the pipeline stages and owns their shutdown.
//!
//! ```text
//!  body ──► read_records ──records──► deliver (decode + watchdog) ──events──► Feed<T>
//!               │                          │
//!               └────────── errors ────────┴──► supervise ──► cancel token
//! ```
//!
//! `supervise` keeps the first error it receives, fires the shared
//! cancellation token, joins both stages, and only then releases its own
//! event sender and signals completion. The consumer therefore never sees the
//! event channel close before [`Feed::err`] is settled.

use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::decode::{FeedMessage, Frame, decode_record};
use super::reader::read_records;
use super::watchdog::{Watch, Watchdog};
use crate::config::FeedConfig;
use crate::constants::stream::ERROR_CHANNEL_CAPACITY;
use crate::error::FeedError;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Shared {
    /// Fired once, by the supervisor or by a caller, to stop every stage.
    cancel: CancellationToken,
    /// Fired by the supervisor after every stage has exited.
    closed: CancellationToken,
    /// First terminal error.
    error: OnceLock<FeedError>,
}

/// Cloneable control handle of a [`Feed`].
///
/// Lets any task close the feed or inspect its terminal error while another
/// task owns the event receiver.
#[derive(Debug, Clone)]
pub struct FeedControl {
    shared: Arc<Shared>,
}

impl FeedControl {
    /// Request shutdown and wait until every stage has stopped.
    ///
    /// Idempotent; concurrent callers all return once the feed is closed.
    pub async fn close(&self) {
        self.shared.cancel.cancel();
        self.shared.closed.cancelled().await;
    }

    /// Request shutdown without waiting for it.
    pub fn cancel(&self) {
        self.shared.cancel.cancel();
    }

    /// Wait until the feed has stopped, without requesting it.
    pub async fn closed(&self) {
        self.shared.closed.cancelled().await;
    }

    /// The first terminal error, or `None` while running or after a clean
    /// close by the owner.
    pub fn err(&self) -> Option<&FeedError> {
        self.shared.error.get()
    }

    /// `true` once every stage has stopped.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.is_cancelled()
    }
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// A running streaming feed of `T` events.
///
/// Created by [`OandaClient::stream_pricing`](crate::client::OandaClient::stream_pricing),
/// [`OandaClient::stream_transactions`](crate::client::OandaClient::stream_transactions),
/// or directly over any byte source with [`Feed::spawn`].
///
/// Events arrive in wire order through [`recv`](Self::recv) or the
/// [`Stream`] implementation. When the channel ends, [`err`](Self::err) tells
/// why. Dropping the feed cancels it.
///
/// # Example
///
/// ```no_run
/// use oanda_rs::client::OandaClient;
/// use oanda_rs::config::Environment;
/// use oanda_rs::types::pricing::PricingStreamRequest;
///
/// # #[tokio::main]
/// # async fn main() -> oanda_rs::error::Result<()> {
/// let client = OandaClient::new("your-api-token", Environment::Practice)?;
/// let mut feed = client
///     .stream_pricing("101-001-1234567-001", &PricingStreamRequest::new(["EUR_USD"]))
///     .await?;
///
/// while let Some(price) = feed.recv().await {
///     println!("{} {:?}", price.instrument, price.best_bid());
/// }
/// if let Some(e) = feed.err() {
///     eprintln!("feed stopped: {e}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Feed<T> {
    events: mpsc::Receiver<T>,
    control: FeedControl,
}

impl<T: FeedMessage> Feed<T> {
    /// Start a feed over `stream`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<R>(stream: R, config: &FeedConfig) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let shared = Arc::new(Shared::default());
        let cancel = shared.cancel.clone();

        let (record_tx, record_rx) = mpsc::channel::<Bytes>(config.capacity());
        let (event_tx, event_rx) = mpsc::channel::<T>(config.capacity());
        let (error_tx, error_rx) = mpsc::channel::<FeedError>(ERROR_CHANNEL_CAPACITY);

        let watchdog = Watchdog::new(record_rx, config.heartbeat_timeout, config.initial_grace);

        let mut stages = JoinSet::new();
        stages.spawn(read_records(stream, record_tx, error_tx.clone(), cancel.clone()));
        stages.spawn(deliver(watchdog, event_tx.clone(), error_tx, cancel));
        tokio::spawn(supervise(stages, error_rx, event_tx, shared.clone()));

        tracing::debug!(
            buffer_size = config.capacity(),
            timeout = ?config.heartbeat_timeout,
            "feed started"
        );

        Self {
            events: event_rx,
            control: FeedControl { shared },
        }
    }
}

impl<T> Feed<T> {
    /// Receive the next event. Returns `None` once the feed has stopped and
    /// every event delivered before the stop has been received.
    pub async fn recv(&mut self) -> Option<T> {
        self.events.recv().await
    }

    /// Close the feed and wait until every stage has stopped.
    ///
    /// Events still buffered in the channel are discarded. Idempotent.
    pub async fn close(&mut self) {
        self.control.close().await;
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }

    /// The first terminal error, or `None` while running or after a clean
    /// close.
    pub fn err(&self) -> Option<&FeedError> {
        self.control.err()
    }

    /// A cloneable handle for closing the feed from other tasks.
    pub fn control(&self) -> FeedControl {
        self.control.clone()
    }

    /// `true` once every stage has stopped.
    pub fn is_closed(&self) -> bool {
        self.control.is_closed()
    }
}

impl<T> Stream for Feed<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.events.poll_recv(cx)
    }
}

impl<T> Drop for Feed<T> {
    fn drop(&mut self) {
        self.control.cancel();
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Decode records, watch their liveness, and forward events in order.
async fn deliver<T: FeedMessage>(
    mut watchdog: Watchdog<Bytes>,
    events: mpsc::Sender<T>,
    errors: mpsc::Sender<FeedError>,
    cancel: CancellationToken,
) {
    loop {
        let watched = tokio::select! {
            () = cancel.cancelled() => return,
            watched = watchdog.next() => watched,
        };

        let record = match watched {
            Watch::Item(record) => record,
            Watch::Closed => {
                report(&errors, &cancel, FeedError::Disconnected);
                return;
            }
            Watch::Silent(silence) => {
                report(&errors, &cancel, FeedError::HeartbeatTimeout(silence));
                return;
            }
        };

        match decode_record::<T>(&record) {
            Ok(Some(Frame::Event(event))) => {
                // Shutdown wins over a consumer that stopped reading.
                tokio::select! {
                    () = cancel.cancelled() => return,
                    sent = events.send(event) => {
                        if sent.is_err() {
                            return;
                        }
                    }
                }
            }
            Ok(Some(Frame::Heartbeat(heartbeat))) => {
                tracing::trace!(?heartbeat, "heartbeat");
            }
            Ok(None) => {}
            Err(e) => {
                report(&errors, &cancel, e);
                return;
            }
        }
    }
}

/// Hand a stage error to the supervisor unless shutdown already began.
///
/// Each stage reports at most once, so the error channel never fills up.
fn report(errors: &mpsc::Sender<FeedError>, cancel: &CancellationToken, error: FeedError) {
    if !cancel.is_cancelled() {
        let _ = errors.try_send(error);
    }
}

/// Keep the first error, stop every stage, then close the feed.
async fn supervise<T>(
    mut stages: JoinSet<()>,
    mut errors: mpsc::Receiver<FeedError>,
    events: mpsc::Sender<T>,
    shared: Arc<Shared>,
) {
    tokio::select! {
        biased;

        () = shared.cancel.cancelled() => {
            // Stages only report before cancellation, so a queued error
            // still precedes the close.
            match errors.try_recv() {
                Ok(error) => {
                    tracing::warn!(error = %error, "feed terminated");
                    let _ = shared.error.set(error);
                }
                Err(_) => tracing::debug!("feed closed by owner"),
            }
        }
        error = errors.recv() => {
            if let Some(error) = error {
                tracing::warn!(error = %error, "feed terminated");
                let _ = shared.error.set(error);
            }
            shared.cancel.cancel();
        }
    }

    // Later errors are shutdown noise.
    errors.close();

    while let Some(joined) = stages.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "feed stage failed");
        }
    }

    drop(events);
    shared.closed.cancel();
    tracing::info!("feed closed");
}

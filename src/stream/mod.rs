//! Heartbeat-monitored streaming feeds.
//!
//! The v20 streaming endpoints answer with a chunked HTTP body carrying one
//! JSON object per line: domain events (prices or transactions) interleaved
//! with periodic `HEARTBEAT` records. A [`Feed`] turns such a body into a
//! bounded channel of typed events.
//!
//! ## Pipeline
//!
//! - **Line reader**: the only stage doing I/O; splits the body into records.
//! - **Decoder** ([`decode_record`]): each record becomes an event or a
//!   heartbeat; heartbeats never reach the consumer.
//! - **[`Watchdog`]**: declares the stream dead when no record of any kind
//!   arrives within the heartbeat timeout, catching silent disconnects that
//!   neither a socket error nor end of stream would reveal.
//! - **Controller**: one cancellation token, first error wins, and a close
//!   that waits for every stage.
//!
//! ## Termination
//!
//! A feed stops on the first of: owner close, read error, decode error,
//! heartbeat timeout, or end of stream. The event channel then ends and
//! [`Feed::err`] reports the cause (`None` for an owner close). There is no
//! reconnection; open a new feed to resume.

mod decode;
mod feed;
mod reader;
mod watchdog;

pub use decode::{FeedMessage, Frame, decode_record};
pub use feed::{Feed, FeedControl};
pub use watchdog::{Watch, Watchdog};

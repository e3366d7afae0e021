//! Record decoder: turns one wire record into an event or a heartbeat.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::constants::stream::HEARTBEAT_TYPE;
use crate::error::FeedError;

/// A payload type that can be carried by a streaming [`Feed`](super::Feed).
///
/// Each feed pairs its event schema with the heartbeat schema the server
/// interleaves on the same stream.
pub trait FeedMessage: DeserializeOwned + Send + 'static {
    /// Schema of the heartbeat records of this feed.
    type Heartbeat: DeserializeOwned + fmt::Debug + Send + 'static;
}

/// A decoded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<T, H> {
    /// A domain event, forwarded to the consumer.
    Event(T),
    /// A liveness signal, consumed internally.
    Heartbeat(H),
}

/// Just the discriminator of a record.
#[derive(Deserialize)]
struct Tag {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Decode a single record.
///
/// Records tagged `"type": "HEARTBEAT"` are decoded with the feed's heartbeat
/// schema, everything else with its event schema. Blank records yield
/// `Ok(None)`.
pub fn decode_record<T: FeedMessage>(
    record: &[u8],
) -> Result<Option<Frame<T, T::Heartbeat>>, FeedError> {
    if record.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let decode_err = |source| FeedError::Decode {
        source,
        record: String::from_utf8_lossy(record).trim_end().to_owned(),
    };

    let tag: Tag = serde_json::from_slice(record).map_err(decode_err)?;
    let frame = if tag.kind.as_deref() == Some(HEARTBEAT_TYPE) {
        Frame::Heartbeat(serde_json::from_slice(record).map_err(decode_err)?)
    } else {
        Frame::Event(serde_json::from_slice(record).map_err(decode_err)?)
    };
    Ok(Some(frame))
}

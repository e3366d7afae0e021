//! Line reader: splits a response body into newline-terminated records.

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::constants::stream::RECORD_TERMINATOR;
use crate::error::FeedError;

/// Read records off `stream` until end of input, a read error, or
/// cancellation, forwarding each one (terminator included) on `records`.
///
/// End of input is signalled by dropping `records`; the next stage reports it
/// once every earlier record has been handled. A read error is reported on
/// `errors` unless the feed is already shutting down. The stream is dropped
/// on every exit path.
pub(crate) async fn read_records<R>(
    stream: R,
    records: mpsc::Sender<Bytes>,
    errors: mpsc::Sender<FeedError>,
    cancel: CancellationToken,
) where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut line = Vec::with_capacity(1024);

    loop {
        let read = tokio::select! {
            () = cancel.cancelled() => break,
            read = reader.read_until(RECORD_TERMINATOR, &mut line) => read,
        };

        match read {
            Ok(0) => {
                tracing::debug!("response stream reached end of input");
                break;
            }
            // A final record without terminator is still forwarded; the
            // decoder decides whether it is complete.
            Ok(_) => {
                let record = Bytes::from(std::mem::take(&mut line));
                tokio::select! {
                    () = cancel.cancelled() => break,
                    sent = records.send(record) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                if !cancel.is_cancelled() {
                    tracing::debug!(error = %e, "response stream read failed");
                    let _ = errors.try_send(FeedError::Transport(e));
                }
                break;
            }
        }
    }
}

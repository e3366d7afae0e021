//! Pricing endpoints: snapshots and the streaming price feed.

use std::io;

use chrono::SecondsFormat;
use futures_util::TryStreamExt;
use tokio_util::io::StreamReader;

use crate::client::OandaClient;
use crate::error::{OandaError, Result};
use crate::stream::Feed;
use crate::types::pricing::*;

impl OandaClient {
    /// Retrieve current prices for a list of instruments.
    ///
    /// **Endpoint:** `GET /v3/accounts/{accountID}/pricing`
    pub async fn get_pricing(
        &self,
        account_id: &str,
        req: &PricingRequest,
    ) -> Result<PricingResponse> {
        let mut query = vec![("instruments", instrument_list(&req.instruments)?)];
        if let Some(since) = req.since {
            query.push(("since", since.to_rfc3339_opts(SecondsFormat::Nanos, true)));
        }
        if let Some(include) = req.include_home_conversions {
            query.push(("includeHomeConversions", include.to_string()));
        }

        self.get(&format!("/v3/accounts/{account_id}/pricing"), &query)
            .await
    }

    /// Open a streaming price feed.
    ///
    /// Returns as soon as the server accepted the request; prices then arrive
    /// asynchronously on the returned [`Feed`]. A rejected request (bad
    /// instrument, bad token, ...) fails here with [`OandaError::Api`].
    ///
    /// **Endpoint:** `GET /v3/accounts/{accountID}/pricing/stream`
    pub async fn stream_pricing(
        &self,
        account_id: &str,
        req: &PricingStreamRequest,
    ) -> Result<Feed<Price>> {
        let instruments = instrument_list(&req.instruments)?;
        let mut query = vec![("instruments", instruments.clone())];
        if let Some(snapshot) = req.snapshot {
            query.push(("snapshot", snapshot.to_string()));
        }
        if let Some(include) = req.include_home_conversions {
            query.push(("includeHomeConversions", include.to_string()));
        }

        let resp = self
            .open_stream(&format!("/v3/accounts/{account_id}/pricing/stream"), &query)
            .await?;
        let body = StreamReader::new(Box::pin(resp.bytes_stream().map_err(io::Error::other)));

        let mut config = self.feed_config().clone();
        if let Some(n) = req.buffer_size {
            config = config.buffer_size(n);
        }

        tracing::info!(account_id, %instruments, "pricing stream opened");
        Ok(Feed::spawn(body, &config))
    }
}

/// Comma-join the requested instruments, rejecting an empty list.
fn instrument_list(instruments: &[String]) -> Result<String> {
    if instruments.is_empty() {
        return Err(OandaError::InvalidArgument(
            "at least one instrument is required".into(),
        ));
    }
    Ok(instruments.join(","))
}

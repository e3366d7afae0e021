#![allow(missing_docs)]
//! Pricing types: price ticks, heartbeats, and the pricing snapshot.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::stream::FeedMessage;
use crate::types::enums::PriceStatus;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Query for `GET /v3/accounts/{accountID}/pricing`.
#[derive(Debug, Clone, Default)]
pub struct PricingRequest {
    /// Instruments to price (e.g. `"EUR_USD"`). Must not be empty.
    pub instruments: Vec<String>,
    /// Only return prices newer than this time.
    pub since: Option<DateTime<Utc>>,
    /// Include home conversion factors in the response.
    pub include_home_conversions: Option<bool>,
}

/// Parameters for `GET /v3/accounts/{accountID}/pricing/stream`.
#[derive(Debug, Clone, Default)]
pub struct PricingStreamRequest {
    /// Instruments to stream. Must not be empty.
    pub instruments: Vec<String>,
    /// Send an initial snapshot of the current prices (server default: true).
    pub snapshot: Option<bool>,
    /// Include home conversion factors in every price.
    pub include_home_conversions: Option<bool>,
    /// Event channel capacity; overrides the client's feed configuration.
    pub buffer_size: Option<usize>,
}

impl PricingStreamRequest {
    /// Stream the given instruments with server defaults.
    pub fn new<I, S>(instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instruments: instruments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// A price tick, as delivered by the pricing stream and the pricing endpoint.
///
/// Price values are kept as the decimal strings sent on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Always `"PRICE"` for stream records.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub instrument: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<PriceStatus>,
    #[serde(default)]
    pub tradeable: Option<bool>,
    #[serde(default)]
    pub bids: Vec<PriceBucket>,
    #[serde(default)]
    pub asks: Vec<PriceBucket>,
    #[serde(default)]
    pub closeout_bid: Option<String>,
    #[serde(default)]
    pub closeout_ask: Option<String>,
    #[serde(default)]
    pub quote_home_conversion_factors: Option<QuoteHomeConversionFactors>,
}

impl Price {
    /// Top of the bid side, if any liquidity is quoted.
    pub fn best_bid(&self) -> Option<&PriceBucket> {
        self.bids.first()
    }

    /// Top of the ask side, if any liquidity is quoted.
    pub fn best_ask(&self) -> Option<&PriceBucket> {
        self.asks.first()
    }
}

impl FeedMessage for Price {
    type Heartbeat = PricingHeartbeat;
}

/// One level of liquidity on one side of a [`Price`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceBucket {
    pub price: String,
    /// Sent as a JSON number.
    pub liquidity: serde_json::Number,
}

/// Factors converting quote-currency quantities into the home currency.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteHomeConversionFactors {
    pub positive_units: String,
    pub negative_units: String,
}

/// Home currency conversion factors for one currency.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeConversions {
    pub currency: String,
    pub account_gain: String,
    pub account_loss: String,
    #[serde(default)]
    pub position_value: Option<String>,
}

// ---------------------------------------------------------------------------
// Heartbeat
// ---------------------------------------------------------------------------

/// Keep-alive record of the pricing stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingHeartbeat {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Snapshot response
// ---------------------------------------------------------------------------

/// Response from `GET /v3/accounts/{accountID}/pricing`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    #[serde(default)]
    pub prices: Vec<Price>,
    /// Only present when `include_home_conversions` was requested.
    #[serde(default)]
    pub home_conversions: Vec<HomeConversions>,
    /// Value for the `since` parameter of the next poll.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

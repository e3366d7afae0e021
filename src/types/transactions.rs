#![allow(missing_docs)]
//! Transaction types: account transactions, stream heartbeats, and the
//! transaction history responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::stream::FeedMessage;
use crate::types::enums::{FundingReason, TransactionType};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Parameters for `GET /v3/accounts/{accountID}/transactions/stream`.
#[derive(Debug, Clone, Default)]
pub struct TransactionStreamRequest {
    /// Event channel capacity; overrides the client's feed configuration.
    pub buffer_size: Option<usize>,
}

/// Query for `GET /v3/accounts/{accountID}/transactions/idrange`.
#[derive(Debug, Clone)]
pub struct TransactionIdRangeRequest {
    /// First transaction ID (inclusive).
    pub from: u64,
    /// Last transaction ID (inclusive).
    pub to: u64,
    /// Only return these transaction types.
    pub types: Vec<TransactionType>,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An account transaction.
///
/// The fields shared by every transaction type are typed; the
/// type-specific remainder (order specs, trade lists, financing details, ...)
/// is kept as raw JSON in [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub time: DateTime<Utc>,
    #[serde(rename = "accountID")]
    pub account_id: String,
    #[serde(default, rename = "userID")]
    pub user_id: Option<u64>,
    #[serde(default, rename = "batchID")]
    pub batch_id: Option<String>,
    #[serde(default, rename = "requestID")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, rename = "orderID")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub pl: Option<String>,
    #[serde(default)]
    pub financing: Option<String>,
    #[serde(default)]
    pub commission: Option<String>,
    #[serde(default)]
    pub account_balance: Option<String>,
    /// Set on `TRANSFER_FUNDS` transactions.
    #[serde(default)]
    pub funding_reason: Option<FundingReason>,
    #[serde(default)]
    pub reject_reason: Option<String>,
    /// Every field not captured above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Transaction {
    /// `true` for the `*_REJECT` family of transaction types.
    pub fn is_reject(&self) -> bool {
        self.reject_reason.is_some()
    }
}

impl FeedMessage for Transaction {
    type Heartbeat = TransactionHeartbeat;
}

// ---------------------------------------------------------------------------
// Heartbeat
// ---------------------------------------------------------------------------

/// Keep-alive record of the transaction stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionHeartbeat {
    #[serde(rename = "type")]
    pub kind: String,
    /// ID of the most recent transaction on the account.
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
    pub time: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// History responses
// ---------------------------------------------------------------------------

/// Response from `GET /v3/accounts/{accountID}/transactions/{transactionID}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    pub transaction: Transaction,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response from the `idrange` and `sinceid` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionListResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

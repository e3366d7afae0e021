//! Transaction endpoints: history lookups and the streaming transaction
//! feed.

use std::io;

use futures_util::TryStreamExt;
use tokio_util::io::StreamReader;

use crate::client::OandaClient;
use crate::error::{OandaError, Result};
use crate::stream::Feed;
use crate::types::enums::TransactionType;
use crate::types::transactions::*;

impl OandaClient {
    /// Retrieve a single transaction.
    ///
    /// **Endpoint:** `GET /v3/accounts/{accountID}/transactions/{transactionID}`
    pub async fn get_transaction(
        &self,
        account_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionResponse> {
        self.get(
            &format!("/v3/accounts/{account_id}/transactions/{transaction_id}"),
            &[],
        )
        .await
    }

    /// Retrieve a range of transactions by ID (both ends inclusive).
    ///
    /// **Endpoint:** `GET /v3/accounts/{accountID}/transactions/idrange`
    pub async fn get_transactions_id_range(
        &self,
        account_id: &str,
        req: &TransactionIdRangeRequest,
    ) -> Result<TransactionListResponse> {
        if req.from > req.to {
            return Err(OandaError::InvalidArgument(format!(
                "transaction range is empty: from {} > to {}",
                req.from, req.to
            )));
        }

        let mut query = vec![("from", req.from.to_string()), ("to", req.to.to_string())];
        if !req.types.is_empty() {
            query.push(("type", type_filter(&req.types)?));
        }

        self.get(
            &format!("/v3/accounts/{account_id}/transactions/idrange"),
            &query,
        )
        .await
    }

    /// Retrieve every transaction after the given ID.
    ///
    /// **Endpoint:** `GET /v3/accounts/{accountID}/transactions/sinceid`
    pub async fn get_transactions_since_id(
        &self,
        account_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionListResponse> {
        self.get(
            &format!("/v3/accounts/{account_id}/transactions/sinceid"),
            &[("id", transaction_id.to_owned())],
        )
        .await
    }

    /// Open a streaming feed of the account's transactions, starting from
    /// when the request is made.
    ///
    /// **Endpoint:** `GET /v3/accounts/{accountID}/transactions/stream`
    pub async fn stream_transactions(
        &self,
        account_id: &str,
        req: &TransactionStreamRequest,
    ) -> Result<Feed<Transaction>> {
        let resp = self
            .open_stream(&format!("/v3/accounts/{account_id}/transactions/stream"), &[])
            .await?;
        let body = StreamReader::new(Box::pin(resp.bytes_stream().map_err(io::Error::other)));

        let mut config = self.feed_config().clone();
        if let Some(n) = req.buffer_size {
            config = config.buffer_size(n);
        }

        tracing::info!(account_id, "transaction stream opened");
        Ok(Feed::spawn(body, &config))
    }
}

/// Comma-join transaction types using their wire names.
fn type_filter(types: &[TransactionType]) -> Result<String> {
    let names = types
        .iter()
        .map(|t| -> Result<String> {
            match serde_json::to_value(t)? {
                serde_json::Value::String(name) => Ok(name),
                other => Err(OandaError::InvalidArgument(format!(
                    "unexpected transaction type encoding: {other}"
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(names.join(","))
}

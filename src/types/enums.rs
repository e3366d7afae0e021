//! Shared enum types that map directly to v20 API string values.
//!
//! Variant names use `SCREAMING_SNAKE_CASE` to match the JSON wire format
//! used by the v20 API, so we suppress the Rust naming convention lint.
#![allow(non_camel_case_types)]

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Transaction Type
// ---------------------------------------------------------------------------

/// The type of a [`Transaction`](crate::types::transactions::Transaction).
///
/// Also usable as a filter for the transaction range endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Account create.
    CREATE,
    /// Account close.
    CLOSE,
    /// Account reopen.
    REOPEN,
    /// Client configuration change.
    CLIENT_CONFIGURE,
    CLIENT_CONFIGURE_REJECT,
    /// Deposit or withdrawal.
    TRANSFER_FUNDS,
    TRANSFER_FUNDS_REJECT,
    MARKET_ORDER,
    MARKET_ORDER_REJECT,
    FIXED_PRICE_ORDER,
    LIMIT_ORDER,
    LIMIT_ORDER_REJECT,
    STOP_ORDER,
    STOP_ORDER_REJECT,
    MARKET_IF_TOUCHED_ORDER,
    MARKET_IF_TOUCHED_ORDER_REJECT,
    TAKE_PROFIT_ORDER,
    TAKE_PROFIT_ORDER_REJECT,
    STOP_LOSS_ORDER,
    STOP_LOSS_ORDER_REJECT,
    GUARANTEED_STOP_LOSS_ORDER,
    GUARANTEED_STOP_LOSS_ORDER_REJECT,
    TRAILING_STOP_LOSS_ORDER,
    TRAILING_STOP_LOSS_ORDER_REJECT,
    /// An order was filled.
    ORDER_FILL,
    /// An order was cancelled.
    ORDER_CANCEL,
    ORDER_CANCEL_REJECT,
    ORDER_CLIENT_EXTENSIONS_MODIFY,
    ORDER_CLIENT_EXTENSIONS_MODIFY_REJECT,
    TRADE_CLIENT_EXTENSIONS_MODIFY,
    TRADE_CLIENT_EXTENSIONS_MODIFY_REJECT,
    MARGIN_CALL_ENTER,
    MARGIN_CALL_EXTEND,
    MARGIN_CALL_EXIT,
    DELAYED_TRADE_CLOSURE,
    /// Daily financing charge or credit.
    DAILY_FINANCING,
    DIVIDEND_ADJUSTMENT,
    RESET_RESETTABLE_PL,
    /// A type this crate does not know about yet.
    #[serde(other)]
    UNKNOWN,
}

// ---------------------------------------------------------------------------
// Price Status
// ---------------------------------------------------------------------------

/// Tradeability status of a [`Price`](crate::types::pricing::Price).
///
/// Deprecated by the API in favour of `tradeable`, but still sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceStatus {
    Tradeable,
    NonTradeable,
    Invalid,
}

// ---------------------------------------------------------------------------
// Funding Reason
// ---------------------------------------------------------------------------

/// Reason for a `TRANSFER_FUNDS` transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingReason {
    CLIENT_FUNDING,
    ACCOUNT_TRANSFER,
    DIVISION_MIGRATION,
    SITE_MIGRATION,
    ADJUSTMENT,
    #[serde(other)]
    UNKNOWN,
}

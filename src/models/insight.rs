use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the trading_insights table. At most one row per account;
/// regeneration replaces the advice in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TradingInsight {
    pub account_id: Uuid,
    pub advice: String,
    pub updated_at: DateTime<Utc>,
}

/// Returned by GET /insights when no insight row exists for the account.
pub const NO_INSIGHTS_MESSAGE: &str =
    "No insights available yet. Close a few trades with retrospectives to generate advice.";

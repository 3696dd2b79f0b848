use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the trades table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trade {
    pub id: Uuid,
    pub account_id: Uuid,
    pub currency_pair: String,
    pub direction: String,
    pub rationale: String,
    pub outcome: String,
    pub profit_loss: Option<Decimal>,
    pub retrospective: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A trade plus its screenshots re-encoded as data-URI strings,
/// as returned by GET /trade?id=.
#[derive(Debug, Clone, Serialize)]
pub struct TradeWithScreenshots {
    #[serde(flatten)]
    pub trade: Trade,
    pub screenshots: Vec<String>,
}

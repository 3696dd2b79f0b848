use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the trading_accounts table.
///
/// Invariant: current_balance equals initial_balance plus the sum of
/// profit_loss across all trades on the account with a non-null profit_loss.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TradingAccount {
    pub id: Uuid,
    pub name: String,
    pub currency: String,
    pub initial_balance: Decimal,
    pub current_balance: Decimal,
    pub created_at: DateTime<Utc>,
}

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Trade;

/// Insert a new trade. Runs on a connection so screenshot inserts and the
/// balance recompute can share the transaction.
#[allow(clippy::too_many_arguments)]
pub async fn insert_trade(
    conn: &mut PgConnection,
    account_id: Uuid,
    currency_pair: &str,
    direction: &str,
    rationale: &str,
    outcome: &str,
    profit_loss: Option<Decimal>,
    retrospective: Option<&str>,
) -> anyhow::Result<Trade> {
    let trade = sqlx::query_as::<_, Trade>(
        r#"
        INSERT INTO trades (account_id, currency_pair, direction, rationale, outcome, profit_loss, retrospective)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(currency_pair)
    .bind(direction)
    .bind(rationale)
    .bind(outcome)
    .bind(profit_loss)
    .bind(retrospective)
    .fetch_one(conn)
    .await?;

    Ok(trade)
}

/// Get all trades, newest first.
pub async fn get_all_trades(pool: &PgPool) -> anyhow::Result<Vec<Trade>> {
    let trades = sqlx::query_as::<_, Trade>("SELECT * FROM trades ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(trades)
}

pub async fn get_trade_by_id(pool: &PgPool, trade_id: Uuid) -> anyhow::Result<Option<Trade>> {
    let trade = sqlx::query_as::<_, Trade>("SELECT * FROM trades WHERE id = $1")
        .bind(trade_id)
        .fetch_optional(pool)
        .await?;

    Ok(trade)
}

/// Overwrite the mutable fields of a trade and refresh updated_at.
/// Returns None if no trade matches.
#[allow(clippy::too_many_arguments)]
pub async fn update_trade(
    conn: &mut PgConnection,
    trade_id: Uuid,
    currency_pair: &str,
    direction: &str,
    rationale: &str,
    outcome: &str,
    profit_loss: Option<Decimal>,
    retrospective: Option<&str>,
) -> anyhow::Result<Option<Trade>> {
    let trade = sqlx::query_as::<_, Trade>(
        r#"
        UPDATE trades
        SET currency_pair = $2,
            direction = $3,
            rationale = $4,
            outcome = $5,
            profit_loss = $6,
            retrospective = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(trade_id)
    .bind(currency_pair)
    .bind(direction)
    .bind(rationale)
    .bind(outcome)
    .bind(profit_loss)
    .bind(retrospective)
    .fetch_optional(conn)
    .await?;

    Ok(trade)
}

/// Trades with both a rationale and a retrospective, most recently
/// updated first. These form the context for insight generation.
pub async fn get_reviewed_trades(pool: &PgPool, account_id: Uuid) -> anyhow::Result<Vec<Trade>> {
    let trades = sqlx::query_as::<_, Trade>(
        r#"
        SELECT * FROM trades
        WHERE account_id = $1
          AND rationale <> ''
          AND retrospective IS NOT NULL
          AND retrospective <> ''
        ORDER BY updated_at DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(trades)
}

/// Per-outcome aggregate for the analytics endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OutcomeSummary {
    pub outcome: String,
    pub trade_count: i64,
    pub total_pl: Option<Decimal>,
}

pub async fn get_outcome_summary(
    pool: &PgPool,
    account_id: Uuid,
) -> anyhow::Result<Vec<OutcomeSummary>> {
    let rows = sqlx::query_as::<_, OutcomeSummary>(
        r#"
        SELECT outcome, COUNT(*) AS trade_count, SUM(profit_loss) AS total_pl
        FROM trades
        WHERE account_id = $1
        GROUP BY outcome
        ORDER BY outcome
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

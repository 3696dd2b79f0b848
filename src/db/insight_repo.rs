use sqlx::PgPool;
use uuid::Uuid;

use crate::models::TradingInsight;

/// Create or replace the single insight row for an account.
pub async fn upsert_insight(
    pool: &PgPool,
    account_id: Uuid,
    advice: &str,
) -> anyhow::Result<TradingInsight> {
    let insight = sqlx::query_as::<_, TradingInsight>(
        r#"
        INSERT INTO trading_insights (account_id, advice)
        VALUES ($1, $2)
        ON CONFLICT (account_id) DO UPDATE
            SET advice = $2, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(advice)
    .fetch_one(pool)
    .await?;

    Ok(insight)
}

pub async fn get_insight(
    pool: &PgPool,
    account_id: Uuid,
) -> anyhow::Result<Option<TradingInsight>> {
    let insight = sqlx::query_as::<_, TradingInsight>(
        "SELECT * FROM trading_insights WHERE account_id = $1",
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    Ok(insight)
}

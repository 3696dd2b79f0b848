use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::TradingAccount;

/// Insert a new trading account. The current balance starts equal to the
/// initial balance.
pub async fn insert_account(
    pool: &PgPool,
    name: &str,
    currency: &str,
    initial_balance: Decimal,
) -> anyhow::Result<TradingAccount> {
    let account = sqlx::query_as::<_, TradingAccount>(
        r#"
        INSERT INTO trading_accounts (name, currency, initial_balance, current_balance)
        VALUES ($1, $2, $3, $3)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(currency)
    .bind(initial_balance)
    .fetch_one(pool)
    .await?;

    Ok(account)
}

/// Get all accounts, newest first.
pub async fn get_all_accounts(pool: &PgPool) -> anyhow::Result<Vec<TradingAccount>> {
    let accounts = sqlx::query_as::<_, TradingAccount>(
        "SELECT * FROM trading_accounts ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(accounts)
}

pub async fn get_account_by_id(
    pool: &PgPool,
    account_id: Uuid,
) -> anyhow::Result<Option<TradingAccount>> {
    let account = sqlx::query_as::<_, TradingAccount>(
        "SELECT * FROM trading_accounts WHERE id = $1",
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Recompute the account's current balance from the authoritative sum of
/// trade P/L. Runs on a connection so callers can scope it inside the same
/// transaction as the trade write that made it stale.
pub async fn recompute_balance(
    conn: &mut PgConnection,
    account_id: Uuid,
) -> anyhow::Result<Decimal> {
    // Take the account row lock before recomputing. Under READ COMMITTED a
    // blocked UPDATE re-executes with its original statement snapshot, so
    // without the explicit lock a concurrent writer's just-committed trade
    // change would be missing from the SUM. Locking first means the UPDATE
    // below only starts once the previous writer has committed.
    sqlx::query("SELECT 1 FROM trading_accounts WHERE id = $1 FOR UPDATE")
        .bind(account_id)
        .execute(&mut *conn)
        .await?;

    let (balance,): (Decimal,) = sqlx::query_as(
        r#"
        UPDATE trading_accounts
        SET current_balance = initial_balance + COALESCE(
            (SELECT SUM(profit_loss) FROM trades
             WHERE account_id = $1 AND profit_loss IS NOT NULL),
            0
        )
        WHERE id = $1
        RETURNING current_balance
        "#,
    )
    .bind(account_id)
    .fetch_one(conn)
    .await?;

    Ok(balance)
}

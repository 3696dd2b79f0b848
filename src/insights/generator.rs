use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{insight_repo, trade_repo};
use crate::models::Trade;
use crate::services::advice_client::AdviceClient;

/// Generate fresh advice for an account: load its reviewed trades, send the
/// serialized journal to the advice API, and upsert the returned text.
/// An empty journal is still sent; whatever the API returns is stored.
pub async fn generate_insights(
    pool: &PgPool,
    client: &AdviceClient,
    account_id: Uuid,
) -> anyhow::Result<String> {
    let trades = trade_repo::get_reviewed_trades(pool, account_id).await?;

    tracing::info!(
        %account_id,
        reviewed_trades = trades.len(),
        "Generating insights"
    );

    let context = build_context(&trades);
    let advice = client.generate(&context).await?;

    insight_repo::upsert_insight(pool, account_id, &advice).await?;

    Ok(advice)
}

/// Serialize the reviewed trades into the journal context sent to the
/// advice API.
pub fn build_context(trades: &[Trade]) -> String {
    let entries: Vec<serde_json::Value> = trades
        .iter()
        .map(|t| {
            json!({
                "currency_pair": t.currency_pair,
                "rationale": t.rationale,
                "retrospective": t.retrospective,
                "outcome": t.outcome,
            })
        })
        .collect();

    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reviewed_trade(pair: &str, rationale: &str, retrospective: &str, outcome: &str) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            currency_pair: pair.into(),
            direction: "BUY".into(),
            rationale: rationale.into(),
            outcome: outcome.into(),
            profit_loss: None,
            retrospective: Some(retrospective.into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_journal_serializes_to_empty_array() {
        assert_eq!(build_context(&[]), "[]");
    }

    #[test]
    fn context_carries_the_four_journal_fields() {
        let trades = vec![reviewed_trade(
            "EURUSD",
            "breakout above resistance",
            "entered too late",
            "LOSS",
        )];

        let parsed: serde_json::Value = serde_json::from_str(&build_context(&trades)).unwrap();
        let entry = &parsed[0];
        assert_eq!(entry["currency_pair"], "EURUSD");
        assert_eq!(entry["rationale"], "breakout above resistance");
        assert_eq!(entry["retrospective"], "entered too late");
        assert_eq!(entry["outcome"], "LOSS");
    }
}

use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::services::advice_client::AdviceClient;

use super::dispatcher::InsightJob;
use super::generator::generate_insights;

/// Drain the insight queue. One job failure never stops the worker; without
/// an advice client (no API key configured) jobs are acknowledged and dropped.
pub async fn run_insight_worker(
    mut rx: mpsc::Receiver<InsightJob>,
    pool: PgPool,
    client: Option<AdviceClient>,
) {
    tracing::info!(
        advice_api = client.is_some(),
        "Insight worker started"
    );

    while let Some(job) = rx.recv().await {
        let Some(client) = client.as_ref() else {
            tracing::warn!(
                account_id = %job.account_id,
                message_id = %job.message_id,
                "No advice API configured — dropping insight job"
            );
            continue;
        };

        match generate_insights(&pool, client, job.account_id).await {
            Ok(advice) => {
                tracing::info!(
                    account_id = %job.account_id,
                    message_id = %job.message_id,
                    advice_len = advice.len(),
                    "Insights generated"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    account_id = %job.account_id,
                    message_id = %job.message_id,
                    "Insight generation failed"
                );
            }
        }
    }

    tracing::warn!("Insight job channel closed");
}

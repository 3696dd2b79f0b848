//! Queue-transport consumer for insight generation.
//!
//! The binary's own insight jobs flow through the in-process channel and
//! [`super::worker`]; this module is the embedding hook for an external
//! broker (SQS, RabbitMQ, ...): the host's delivery loop hands each batch of
//! records to [`process_batch`] and always acks the batch afterwards.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::advice_client::AdviceClient;

use super::generator::generate_insights;

const GENERATE_ACTION: &str = "generate";

/// One record as delivered by a queue transport.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueRecord {
    /// Transport tag, e.g. "aws:sqs". Informational only.
    #[serde(default)]
    pub event_source: Option<String>,
    /// JSON-encoded command body.
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct InsightCommand {
    action: String,
    account_id: Uuid,
}

/// Process a batch of queue-delivered records. Each record is decoded and
/// handled independently; decode and processing failures are logged and never
/// abort siblings. The batch always reports success to its transport —
/// at-least-once delivery is pushed onto this consumer.
pub async fn process_batch(records: &[QueueRecord], pool: &PgPool, client: &AdviceClient) {
    for record in records {
        let command: InsightCommand = match serde_json::from_str(&record.body) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_source = record.event_source.as_deref().unwrap_or("unknown"),
                    "Undecodable queue record, skipping"
                );
                continue;
            }
        };

        if command.action != GENERATE_ACTION {
            tracing::warn!(action = %command.action, "Unknown queue action, skipping");
            continue;
        }

        if let Err(e) = generate_insights(pool, client, command.account_id).await {
            tracing::error!(
                error = %e,
                account_id = %command.account_id,
                "Queue-triggered insight generation failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_body_decodes_generate_command() {
        let record: QueueRecord = serde_json::from_str(
            r#"{"event_source":"aws:sqs","body":"{\"action\":\"generate\",\"account_id\":\"6f2b9a62-0d4e-4c3f-9a94-0b5a4c6d9e21\"}"}"#,
        )
        .unwrap();

        let command: InsightCommand = serde_json::from_str(&record.body).unwrap();
        assert_eq!(command.action, GENERATE_ACTION);
        assert_eq!(
            command.account_id.to_string(),
            "6f2b9a62-0d4e-4c3f-9a94-0b5a4c6d9e21"
        );
    }

    #[test]
    fn malformed_body_fails_decode_only() {
        let record = QueueRecord {
            event_source: None,
            body: "not json".into(),
        };
        assert!(serde_json::from_str::<InsightCommand>(&record.body).is_err());
    }
}

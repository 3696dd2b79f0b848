use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// A queued insight-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightJob {
    pub message_id: Uuid,
    pub account_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("insight queue is full")]
    QueueFull,

    #[error("insight queue is closed")]
    QueueClosed,
}

/// Hands insight-generation jobs to the worker. Enqueueing never blocks the
/// request path; a full or closed queue surfaces as a DispatchError for the
/// caller to handle.
#[derive(Debug, Clone)]
pub struct InsightDispatcher {
    tx: mpsc::Sender<InsightJob>,
}

impl InsightDispatcher {
    pub fn new(tx: mpsc::Sender<InsightJob>) -> Self {
        Self { tx }
    }

    /// Enqueue generation for an account. Returns the transport message id.
    pub fn enqueue(&self, account_id: Uuid) -> Result<Uuid, DispatchError> {
        let job = InsightJob {
            message_id: Uuid::new_v4(),
            account_id,
        };
        let message_id = job.message_id;

        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DispatchError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DispatchError::QueueClosed,
        })?;

        tracing::info!(%account_id, %message_id, "Insight generation enqueued");
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_delivers_job_with_fresh_message_id() {
        let (tx, mut rx) = mpsc::channel(4);
        let dispatcher = InsightDispatcher::new(tx);
        let account_id = Uuid::new_v4();

        let message_id = dispatcher.enqueue(account_id).expect("enqueue");
        let job = rx.recv().await.expect("job delivered");

        assert_eq!(job.message_id, message_id);
        assert_eq!(job.account_id, account_id);
    }

    #[tokio::test]
    async fn enqueue_reports_full_queue() {
        let (tx, _rx) = mpsc::channel(1);
        let dispatcher = InsightDispatcher::new(tx);

        dispatcher.enqueue(Uuid::new_v4()).expect("first fits");
        let err = dispatcher.enqueue(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DispatchError::QueueFull));
    }

    #[tokio::test]
    async fn enqueue_reports_closed_queue() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let dispatcher = InsightDispatcher::new(tx);

        let err = dispatcher.enqueue(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DispatchError::QueueClosed));
    }
}

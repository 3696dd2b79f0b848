mod common;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::json;

use tradejournal::insights::consumer::{process_batch, QueueRecord};
use tradejournal::insights::generator::generate_insights;
use tradejournal::services::advice_client::AdviceClient;

const CANNED_ADVICE: &str = "Size positions consistently and wait for confirmation.";

#[derive(Clone)]
struct MockApiState {
    contexts: Arc<Mutex<Vec<String>>>,
}

async fn completions(
    State(state): State<MockApiState>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let context = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
    state.contexts.lock().unwrap().push(context);

    Json(json!({
        "choices": [{ "message": { "content": CANNED_ADVICE } }]
    }))
}

/// Spin up an in-process stand-in for the advice API; returns its URL and
/// the contexts it has been sent.
async fn spawn_advice_api() -> (String, Arc<Mutex<Vec<String>>>) {
    let contexts = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/", post(completions))
        .with_state(MockApiState {
            contexts: contexts.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/"), contexts)
}

fn advice_client(url: String) -> AdviceClient {
    AdviceClient::new(reqwest::Client::new(), url, "test-key".into(), "test-model".into())
}

#[tokio::test]
async fn test_generate_insights_builds_context_and_upserts() {
    let pool = common::setup_test_db().await;
    let (url, contexts) = spawn_advice_api().await;
    let client = advice_client(url);

    let account = common::seed_account(&pool, "Reviewed", Decimal::from(1000)).await;
    common::seed_trade(
        &pool,
        account.id,
        "EURUSD",
        "LOSS",
        Some(Decimal::from(-40)),
        Some("chased the move"),
    )
    .await;
    // No retrospective — must stay out of the journal context
    common::seed_trade(&pool, account.id, "GBPUSD", "OPEN", None, None).await;

    let advice = generate_insights(&pool, &client, account.id).await.unwrap();
    assert_eq!(advice, CANNED_ADVICE);

    let sent = contexts.lock().unwrap().clone();
    let journal: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
    let entries = journal.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["currency_pair"], "EURUSD");
    assert_eq!(entries[0]["retrospective"], "chased the move");

    let stored: (String,) =
        sqlx::query_as("SELECT advice FROM trading_insights WHERE account_id = $1")
            .bind(account.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored.0, CANNED_ADVICE);
}

#[tokio::test]
async fn test_generate_insights_replaces_existing_row() {
    let pool = common::setup_test_db().await;
    let (url, _contexts) = spawn_advice_api().await;
    let client = advice_client(url);

    let account = common::seed_account(&pool, "Replace", Decimal::from(1000)).await;
    sqlx::query("INSERT INTO trading_insights (account_id, advice) VALUES ($1, 'stale advice')")
        .bind(account.id)
        .execute(&pool)
        .await
        .unwrap();

    generate_insights(&pool, &client, account.id).await.unwrap();

    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT advice FROM trading_insights WHERE account_id = $1")
            .bind(account.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, CANNED_ADVICE);
}

#[tokio::test]
async fn test_empty_journal_is_still_sent_and_stored() {
    let pool = common::setup_test_db().await;
    let (url, contexts) = spawn_advice_api().await;
    let client = advice_client(url);

    let account = common::seed_account(&pool, "Empty", Decimal::from(1000)).await;

    let advice = generate_insights(&pool, &client, account.id).await.unwrap();
    assert_eq!(advice, CANNED_ADVICE);

    let sent = contexts.lock().unwrap().clone();
    assert_eq!(sent[0], "[]");
}

#[tokio::test]
async fn test_process_batch_isolates_bad_records() {
    let pool = common::setup_test_db().await;
    let (url, _contexts) = spawn_advice_api().await;
    let client = advice_client(url);

    let account = common::seed_account(&pool, "Batch", Decimal::from(1000)).await;

    let records = vec![
        QueueRecord {
            event_source: Some("aws:sqs".into()),
            body: "{ not json".into(),
        },
        QueueRecord {
            event_source: Some("aws:sqs".into()),
            body: json!({ "action": "archive", "account_id": account.id }).to_string(),
        },
        QueueRecord {
            event_source: Some("aws:sqs".into()),
            body: json!({ "action": "generate", "account_id": account.id }).to_string(),
        },
    ];

    // Bad records are logged and skipped; the batch itself never fails
    process_batch(&records, &pool, &client).await;

    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT advice FROM trading_insights WHERE account_id = $1")
            .bind(account.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, CANNED_ADVICE);
}

#[tokio::test]
async fn test_generation_failure_propagates_but_batch_survives() {
    let pool = common::setup_test_db().await;
    // Nothing is listening here
    let client = advice_client("http://127.0.0.1:1/".into());

    let account = common::seed_account(&pool, "Unreachable", Decimal::from(1000)).await;

    let err = generate_insights(&pool, &client, account.id).await;
    assert!(err.is_err());

    let records = vec![QueueRecord {
        event_source: None,
        body: json!({ "action": "generate", "account_id": account.id }).to_string(),
    }];
    process_batch(&records, &pool, &client).await;

    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT advice FROM trading_insights WHERE account_id = $1")
            .bind(account.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert!(rows.is_empty());
}

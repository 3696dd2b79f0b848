use tradejournal::api::router::create_router;
use tradejournal::config::AppConfig;
use tradejournal::insights::{worker::run_insight_worker, InsightDispatcher, InsightJob};
use tradejournal::services::advice_client::AdviceClient;
use tradejournal::{db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database connected");

    // --- Insight generation: queue + worker ---
    let (job_tx, job_rx) =
        tokio::sync::mpsc::channel::<InsightJob>(config.insight_queue_capacity);

    let advice_client = if config.has_insights_api() {
        Some(AdviceClient::new(
            reqwest::Client::new(),
            config.insights_api_url.clone(),
            config.insights_api_key.clone().unwrap(),
            config.insights_model.clone(),
        ))
    } else {
        tracing::warn!("No INSIGHTS_API_KEY — insight jobs will be dropped");
        None
    };

    let worker_pool = pool.clone();
    tokio::spawn(async move {
        run_insight_worker(job_rx, worker_pool, advice_client).await;
    });

    let state = AppState {
        db: pool,
        config,
        insights: InsightDispatcher::new(job_tx),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}

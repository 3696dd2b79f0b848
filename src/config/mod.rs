use std::env;

const DEFAULT_INSIGHTS_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_INSIGHTS_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Advice generation API (optional — insight jobs are skipped without a key)
    pub insights_api_url: String,
    pub insights_api_key: Option<String>,
    pub insights_model: String,

    // Insight job queue
    pub insight_queue_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            insights_api_url: env::var("INSIGHTS_API_URL")
                .unwrap_or_else(|_| DEFAULT_INSIGHTS_API_URL.into()),
            insights_api_key: env::var("INSIGHTS_API_KEY").ok(),
            insights_model: env::var("INSIGHTS_MODEL")
                .unwrap_or_else(|_| DEFAULT_INSIGHTS_MODEL.into()),

            insight_queue_capacity: env::var("INSIGHT_QUEUE_CAPACITY")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
        })
    }

    /// Returns true if the advice generation API is configured.
    pub fn has_insights_api(&self) -> bool {
        self.insights_api_key.is_some()
    }
}

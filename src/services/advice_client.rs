use reqwest::Client;
use serde_json::json;
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are a trading coach. Given a trader's journal of \
currency trades (pair, rationale, retrospective, outcome), produce concise, \
actionable advice on recurring mistakes and strengths. If the journal is empty, \
say there is not enough reviewed history yet.";

#[derive(Debug, Error)]
pub enum AdviceClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Client for the external text-generation API that turns trade journals
/// into coaching advice. OpenAI-compatible chat-completions shape.
#[derive(Debug, Clone)]
pub struct AdviceClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AdviceClient {
    pub fn new(http: Client, api_url: String, api_key: String, model: String) -> Self {
        Self {
            http,
            api_url,
            api_key,
            model,
        }
    }

    /// Generate advice text from the serialized trade context.
    pub async fn generate(&self, context: &str) -> Result<String, AdviceClientError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": context },
            ],
        });

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = resp.json().await?;
        let advice = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AdviceClientError::Unexpected("no message content in completion".into())
            })?;

        Ok(advice.to_string())
    }
}

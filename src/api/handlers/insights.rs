use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::insight_repo;
use crate::errors::AppError;
use crate::models::NO_INSIGHTS_MESSAGE;
use crate::AppState;

use super::accounts::ApiResponse;

#[derive(Deserialize)]
pub struct InsightsQuery {
    pub account_id: Option<Uuid>,
}

fn require_account_id(query: InsightsQuery) -> Result<Uuid, AppError> {
    query
        .account_id
        .ok_or_else(|| AppError::BadRequest("missing required query parameter: account_id".into()))
}

/// GET /insights?account_id= — stored advice for the account. A missing row
/// is not an error; the client gets the fixed placeholder.
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let account_id = require_account_id(query)?;

    let advice = insight_repo::get_insight(&state.db, account_id)
        .await?
        .map(|i| i.advice)
        .unwrap_or_else(|| NO_INSIGHTS_MESSAGE.into());

    Ok(Json(ApiResponse::ok(json!({
        "account_id": account_id,
        "advice": advice,
    }))))
}

/// PUT /insights?account_id= — enqueue insight generation. Returns the
/// dispatch acknowledgment with the queued message id.
pub async fn enqueue(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let account_id = require_account_id(query)?;

    let message_id = state
        .insights
        .enqueue(account_id)
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

    Ok(Json(ApiResponse::ok(json!({
        "account_id": account_id,
        "message_id": message_id,
    }))))
}

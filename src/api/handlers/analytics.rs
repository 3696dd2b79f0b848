use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::db::trade_repo::{self, OutcomeSummary};
use crate::errors::AppError;
use crate::AppState;

use super::accounts::ApiResponse;

/// GET /analytics/{account_id} — trade counts and P/L totals grouped by
/// outcome. An account with no trades gets an empty list.
pub async fn summary(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<OutcomeSummary>>>, AppError> {
    let rows = trade_repo::get_outcome_summary(&state.db, account_id).await?;

    Ok(Json(ApiResponse::ok(rows)))
}

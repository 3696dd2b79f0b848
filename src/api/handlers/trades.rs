use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::{account_repo, screenshot_repo, trade_repo};
use crate::errors::AppError;
use crate::models::{Direction, ScreenshotPayload, TradeWithScreenshots, OUTCOME_OPEN};
use crate::AppState;

use super::accounts::{require, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateTradeRequest {
    pub account_id: Option<Uuid>,
    pub currency_pair: Option<String>,
    pub direction: Option<String>,
    pub rationale: Option<String>,
    pub outcome: Option<String>,
    pub profit_loss: Option<Decimal>,
    pub retrospective: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateTradeRequest {
    pub currency_pair: Option<String>,
    pub direction: Option<String>,
    pub rationale: Option<String>,
    pub outcome: Option<String>,
    pub profit_loss: Option<Decimal>,
    pub retrospective: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
}

#[derive(Deserialize)]
pub struct TradeQuery {
    pub id: Option<Uuid>,
}

fn parse_direction(raw: &str) -> Result<Direction, AppError> {
    Direction::from_api_str(raw)
        .ok_or_else(|| AppError::BadRequest(format!("unknown direction: {raw}")))
}

/// Decode and insert screenshot payloads for a trade on the caller's
/// transaction. Undecodable payloads are logged and skipped.
async fn attach_screenshots(
    conn: &mut sqlx::PgConnection,
    trade_id: Uuid,
    payloads: &[String],
) -> anyhow::Result<()> {
    for raw in payloads {
        match ScreenshotPayload::from_data_uri(raw) {
            Some(payload) => {
                screenshot_repo::insert_screenshot(conn, trade_id, &payload).await?;
            }
            None => {
                tracing::warn!(%trade_id, "Undecodable screenshot payload, skipping");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /trade — create a trade, attach screenshots, refresh the account
/// balance. All writes share one transaction.
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<CreateTradeRequest>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::BadRequest("request body is required".into()))?;

    let account_id = require(req.account_id, "account_id")?;
    let currency_pair = require(req.currency_pair, "currency_pair")?;
    let direction = parse_direction(&require(req.direction, "direction")?)?;
    let rationale = require(req.rationale, "rationale")?;
    let outcome = req.outcome.unwrap_or_else(|| OUTCOME_OPEN.into());
    let profit_loss = req.profit_loss.unwrap_or(Decimal::ZERO);

    account_repo::get_account_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {account_id} not found")))?;

    let mut tx = state.db.begin().await?;

    let trade = trade_repo::insert_trade(
        &mut tx,
        account_id,
        &currency_pair,
        &direction.to_string(),
        &rationale,
        &outcome,
        Some(profit_loss),
        req.retrospective.as_deref(),
    )
    .await?;

    attach_screenshots(&mut tx, trade.id, &req.screenshots).await?;
    account_repo::recompute_balance(&mut tx, account_id).await?;

    tx.commit().await?;

    tracing::info!(trade_id = %trade.id, %account_id, "Trade created");

    Ok(Json(ApiResponse::ok(json!({ "id": trade.id }))))
}

/// GET /trade — with ?id= returns one trade plus its screenshots as data
/// URIs; without it, all trades newest first.
pub async fn list_or_detail(
    State(state): State<AppState>,
    Query(query): Query<TradeQuery>,
) -> Result<Response, AppError> {
    let Some(id) = query.id else {
        let trades = trade_repo::get_all_trades(&state.db).await?;
        return Ok(Json(ApiResponse::ok(trades)).into_response());
    };

    let trade = trade_repo::get_trade_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("trade {id} not found")))?;

    let screenshots = screenshot_repo::get_by_trade(&state.db, id)
        .await?
        .iter()
        .map(|s| s.to_data_uri())
        .collect();

    Ok(Json(ApiResponse::ok(TradeWithScreenshots { trade, screenshots })).into_response())
}

/// PATCH /trade?id= — overwrite the mutable fields, append any new
/// screenshots, refresh the balance, and (for a closed P/L) kick off insight
/// generation. The update's outcome never depends on the dispatch.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<TradeQuery>,
    body: Option<Json<UpdateTradeRequest>>,
) -> Result<Json<ApiResponse<crate::models::Trade>>, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest("missing required query parameter: id".into()))?;
    let Json(req) = body.ok_or_else(|| AppError::BadRequest("request body is required".into()))?;

    let currency_pair = require(req.currency_pair, "currency_pair")?;
    let direction = parse_direction(&require(req.direction, "direction")?)?;
    let rationale = require(req.rationale, "rationale")?;
    let outcome = req.outcome.unwrap_or_else(|| OUTCOME_OPEN.into());

    let mut tx = state.db.begin().await?;

    let trade = trade_repo::update_trade(
        &mut tx,
        id,
        &currency_pair,
        &direction.to_string(),
        &rationale,
        &outcome,
        req.profit_loss,
        req.retrospective.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("trade {id} not found")))?;

    attach_screenshots(&mut tx, trade.id, &req.screenshots).await?;
    let balance = account_repo::recompute_balance(&mut tx, trade.account_id).await?;

    tx.commit().await?;

    tracing::info!(
        trade_id = %trade.id,
        account_id = %trade.account_id,
        current_balance = %balance,
        "Trade updated"
    );

    // Closing out a trade is the signal that fresh insights are worth
    // generating. Dispatch failure must not fail the update.
    if req.profit_loss.is_some() {
        match state.insights.enqueue(trade.account_id) {
            Ok(message_id) => {
                tracing::debug!(%message_id, account_id = %trade.account_id, "Insight job dispatched");
            }
            Err(e) => {
                tracing::warn!(error = %e, account_id = %trade.account_id, "Insight dispatch failed");
            }
        }
    }

    Ok(Json(ApiResponse::ok(trade)))
}

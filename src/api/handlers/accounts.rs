use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::db::account_repo;
use crate::errors::AppError;
use crate::models::TradingAccount;
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Presence check for required body fields.
pub fn require<T>(field: Option<T>, name: &str) -> Result<T, AppError> {
    field.ok_or_else(|| AppError::BadRequest(format!("missing required field: {name}")))
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub initial_balance: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /account — create a trading account
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<CreateAccountRequest>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::BadRequest("request body is required".into()))?;

    let name = require(req.name, "name")?;
    let currency = require(req.currency, "currency")?;
    let initial_balance = require(req.initial_balance, "initial_balance")?;

    let account =
        account_repo::insert_account(&state.db, &name, &currency, initial_balance).await?;

    tracing::info!(account_id = %account.id, name = %account.name, "Account created");

    Ok(Json(ApiResponse::ok(json!({ "id": account.id }))))
}

/// GET /account — list all accounts, newest first
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TradingAccount>>>, AppError> {
    let accounts = account_repo::get_all_accounts(&state.db).await?;

    Ok(Json(ApiResponse::ok(accounts)))
}

/// GET /account/{id} — account detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TradingAccount>>, AppError> {
    let account = account_repo::get_account_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {id} not found")))?;

    Ok(Json(ApiResponse::ok(account)))
}

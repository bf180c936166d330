//! REST API handlers
//!
//! Thin glue between axum extractors, the pure core and the history store.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use shared::CalculationId;

use crate::core::formatter::{self, CalculationResponse, CalculationView, HistoryResponse};
use crate::core::{MathRequest, build_record, parse_limit, resolve, validate};
use crate::error::{ApiError, INVALID_LIMIT, MALFORMED_BODY};
use crate::traits::HistoryStore;
use crate::webserver_impl::AppState;

/// Capability description - `/` and `/api`
pub async fn api_info() -> Json<Value> {
    Json(formatter::capabilities())
}

/// Liveness probe - `/health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Evaluate and record a calculation - `POST /api/math`
pub async fn calculate<H>(
    State(state): State<AppState<H>>,
    body: Result<Json<MathRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, ApiError>
where
    H: HistoryStore + 'static,
{
    let Json(request) = body.map_err(|rejection| {
        debug!(error = %rejection, "Unreadable calculation request body");
        ApiError::Validation(MALFORMED_BODY)
    })?;

    let input = validate(&request)?;
    let resolution = resolve(&input.operation, input.num1, input.num2)?;
    debug!(
        operation = %resolution.operation,
        num1 = input.num1,
        num2 = input.num2,
        result = resolution.result,
        "Computed calculation"
    );

    let calculation = build_record(input.num1, input.num2, resolution.operation, resolution.result);
    let calculation_id = state.store.insert(calculation).await?;

    info!(calculation_id = %calculation_id, operation = %resolution.operation, "🧮 Calculation recorded");
    Ok(Json(formatter::calculation_response(
        input.num1,
        input.num2,
        &resolution,
        calculation_id,
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<String>,
}

/// Most recent calculations - `GET /api/history?limit=N`
pub async fn history<H>(
    State(state): State<AppState<H>>,
    query: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError>
where
    H: HistoryStore + 'static,
{
    let Query(params) = query.map_err(|rejection| {
        debug!(error = %rejection, "Unreadable history query");
        ApiError::Validation(INVALID_LIMIT)
    })?;
    let limit = parse_limit(params.limit.as_deref())?;
    let records = state.store.list(limit).await?;
    Ok(Json(formatter::history_response(records)))
}

/// Single calculation by id - `GET /api/calculation/:id`
pub async fn get_calculation<H>(
    State(state): State<AppState<H>>,
    Path(id): Path<String>,
) -> Result<Json<CalculationView>, ApiError>
where
    H: HistoryStore + 'static,
{
    let record = state.store.get_by_id(&CalculationId::from(id)).await?;
    Ok(Json(CalculationView::from(record)))
}

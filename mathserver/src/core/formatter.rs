//! Response payloads
//!
//! Pure shaping of success and error bodies; status codes come from
//! `ApiError::status_code`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use shared::json_number;
use shared::{CalculationId, CalculationRecord, Operation};

use crate::core::operations::{Resolution, synonyms_for};
use crate::error::ApiError;
use crate::traits::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

/// Body of a successful `POST /api/math`
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse {
    #[serde(serialize_with = "json_number::serialize")]
    pub num1: f64,
    #[serde(serialize_with = "json_number::serialize")]
    pub num2: f64,
    pub operation: Operation,
    #[serde(serialize_with = "json_number::serialize")]
    pub result: f64,
    pub message: String,
    #[serde(rename = "calculationId")]
    pub calculation_id: CalculationId,
}

/// A stored calculation as returned by the history and lookup endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CalculationView {
    pub id: CalculationId,
    #[serde(serialize_with = "json_number::serialize")]
    pub num1: f64,
    #[serde(serialize_with = "json_number::serialize")]
    pub num2: f64,
    pub operation: Operation,
    #[serde(serialize_with = "json_number::serialize")]
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<CalculationRecord> for CalculationView {
    fn from(record: CalculationRecord) -> Self {
        Self {
            id: record.id,
            num1: record.num1,
            num2: record.num2,
            operation: record.operation,
            result: record.result,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub calculations: Vec<CalculationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `"<num1> <symbol> <num2> = <result>"`
pub fn equation(num1: f64, symbol: &str, num2: f64, result: f64) -> String {
    format!(
        "{} {} {} = {}",
        json_number::render(num1),
        symbol,
        json_number::render(num2),
        json_number::render(result)
    )
}

pub fn calculation_response(
    num1: f64,
    num2: f64,
    resolution: &Resolution,
    calculation_id: CalculationId,
) -> CalculationResponse {
    CalculationResponse {
        num1,
        num2,
        operation: resolution.operation,
        result: resolution.result,
        message: equation(num1, resolution.symbol, num2, resolution.result),
        calculation_id,
    }
}

pub fn history_response(records: Vec<CalculationRecord>) -> HistoryResponse {
    let calculations: Vec<CalculationView> = records.into_iter().map(CalculationView::from).collect();
    HistoryResponse {
        count: calculations.len(),
        calculations,
    }
}

pub fn error_body(error: &ApiError) -> ErrorBody {
    ErrorBody {
        error: error.to_string(),
    }
}

/// Capability description served at `GET /` and `GET /api`
pub fn capabilities() -> Value {
    let operations: Vec<Value> = Operation::ALL
        .iter()
        .map(|operation| {
            json!({
                "name": operation.canonical_name(),
                "symbol": operation.symbol(),
                "accepts": synonyms_for(*operation),
            })
        })
        .collect();

    json!({
        "message": "Math API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "info": "GET /api",
            "calculate": "POST /api/math with {num1: number, num2: number, operation: string}",
            "history": format!(
                "GET /api/history?limit=N (default {DEFAULT_HISTORY_LIMIT}, max {MAX_HISTORY_LIMIT})"
            ),
            "calculation": "GET /api/calculation/:id",
            "health": "GET /health",
        },
        "operations": operations,
    })
}

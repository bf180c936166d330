//! Input validation for calculation and history requests

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, INVALID_LIMIT, MISSING_OPERANDS, MISSING_OPERATION};
use crate::traits::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

/// Raw `POST /api/math` body
///
/// Fields stay untyped so a wrong type is reported as a missing value rather
/// than a body parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct MathRequest {
    #[serde(default)]
    pub num1: Option<Value>,
    #[serde(default)]
    pub num2: Option<Value>,
    #[serde(default)]
    pub operation: Option<Value>,
}

/// Operands and operation name that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub num1: f64,
    pub num2: f64,
    pub operation: String,
}

fn finite_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|number| number.is_finite())
}

/// Check operands first, then the operation name
pub fn validate(request: &MathRequest) -> Result<ValidatedInput, ApiError> {
    let (Some(num1), Some(num2)) = (
        finite_number(request.num1.as_ref()),
        finite_number(request.num2.as_ref()),
    ) else {
        return Err(ApiError::Validation(MISSING_OPERANDS));
    };

    let operation = match request.operation.as_ref().and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ApiError::Validation(MISSING_OPERATION)),
    };

    Ok(ValidatedInput {
        num1,
        num2,
        operation,
    })
}

/// Parse the `limit` query parameter of the history listing
pub fn parse_limit(raw: Option<&str>) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_HISTORY_LIMIT);
    };

    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ApiError::Validation(INVALID_LIMIT)),
        Ok(limit) => Ok(limit.min(MAX_HISTORY_LIMIT)),
    }
}

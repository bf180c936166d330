//! Calculation record model shared between the server and its stores

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned identifier of a calculation record
///
/// Opaque to callers: any string may be presented for lookup, only the store
/// mints new ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(String);

impl CalculationId {
    /// Mint a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CalculationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CalculationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical arithmetic operation stored with every record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    /// Symbol used when rendering the equation string
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Record payload handed to a store; id and timestamp are not yet assigned
#[derive(Clone, Debug, PartialEq)]
pub struct NewCalculation {
    pub num1: f64,
    pub num2: f64,
    pub operation: Operation,
    pub result: f64,
}

/// Immutable, persisted calculation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: CalculationId,
    #[serde(with = "json_number")]
    pub num1: f64,
    #[serde(with = "json_number")]
    pub num2: f64,
    pub operation: Operation,
    #[serde(with = "json_number")]
    pub result: f64,
    /// Store-assigned, non-decreasing in insertion order
    pub timestamp: DateTime<Utc>,
    /// Insertion sequence, breaks ties between equal timestamps
    pub sequence: u64,
}

impl CalculationRecord {
    /// Attach store-assigned identity and ordering to a new calculation
    pub fn from_new(
        calculation: NewCalculation,
        id: CalculationId,
        timestamp: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        Self {
            id,
            num1: calculation.num1,
            num2: calculation.num2,
            operation: calculation.operation,
            result: calculation.result,
            timestamp,
            sequence,
        }
    }

    /// Ordering key for "most recent first" listings
    pub fn recency_key(&self) -> (DateTime<Utc>, u64) {
        (self.timestamp, self.sequence)
    }
}

/// JSON rendering of operands and results
///
/// Integral values inside the exactly-representable integer range are written
/// as JSON integers (`5`, not `5.0`); everything else as a float.
pub mod json_number {
    use serde::{Deserialize, Deserializer, Serializer};

    /// 2^53 - 1
    pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    fn as_integer(value: f64) -> Option<i64> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            Some(value as i64)
        } else {
            None
        }
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match as_integer(*value) {
            Some(integer) => serializer.serialize_i64(integer),
            None => serializer.serialize_f64(*value),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer)
    }

    /// Magnitudes at or above this render in exponent form
    pub const EXPONENT_ABOVE: f64 = 1e21;

    /// Non-zero magnitudes below this render in exponent form
    pub const EXPONENT_BELOW: f64 = 1e-6;

    /// Human-readable form used in equation strings
    pub fn render(value: f64) -> String {
        if let Some(integer) = as_integer(value) {
            return integer.to_string();
        }

        let magnitude = value.abs();
        if value.is_finite()
            && (magnitude >= EXPONENT_ABOVE || (magnitude != 0.0 && magnitude < EXPONENT_BELOW))
        {
            format!("{value:e}")
        } else {
            value.to_string()
        }
    }
}

//! Operation resolution
//!
//! Requested operation names are looked up in a static synonym table. Each
//! entry points at the descriptor of one canonical operation, so supporting a
//! new spelling is a single table row.

use shared::Operation;

use crate::error::ApiError;

/// Canonical operation plus how to evaluate it
#[derive(Debug)]
pub struct OperationDescriptor {
    pub operation: Operation,
    pub apply: fn(f64, f64) -> f64,
    /// Reject a zero right-hand operand before evaluating
    pub rejects_zero_divisor: bool,
}

impl OperationDescriptor {
    pub fn symbol(&self) -> &'static str {
        self.operation.symbol()
    }
}

fn add(num1: f64, num2: f64) -> f64 {
    num1 + num2
}

fn subtract(num1: f64, num2: f64) -> f64 {
    num1 - num2
}

fn multiply(num1: f64, num2: f64) -> f64 {
    num1 * num2
}

fn divide(num1: f64, num2: f64) -> f64 {
    num1 / num2
}

static ADDITION: OperationDescriptor = OperationDescriptor {
    operation: Operation::Addition,
    apply: add,
    rejects_zero_divisor: false,
};

static SUBTRACTION: OperationDescriptor = OperationDescriptor {
    operation: Operation::Subtraction,
    apply: subtract,
    rejects_zero_divisor: false,
};

static MULTIPLICATION: OperationDescriptor = OperationDescriptor {
    operation: Operation::Multiplication,
    apply: multiply,
    rejects_zero_divisor: false,
};

static DIVISION: OperationDescriptor = OperationDescriptor {
    operation: Operation::Division,
    apply: divide,
    rejects_zero_divisor: true,
};

/// Lower-case synonym -> descriptor
pub static SYNONYMS: [(&str, &OperationDescriptor); 8] = [
    ("add", &ADDITION),
    ("addition", &ADDITION),
    ("subtract", &SUBTRACTION),
    ("subtraction", &SUBTRACTION),
    ("multiply", &MULTIPLICATION),
    ("multiplication", &MULTIPLICATION),
    ("divide", &DIVISION),
    ("division", &DIVISION),
];

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub operation: Operation,
    pub symbol: &'static str,
    pub result: f64,
}

/// Find the descriptor for a requested name, case-insensitively
pub fn lookup(name: &str) -> Option<&'static OperationDescriptor> {
    let normalized = name.to_lowercase();
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == normalized)
        .map(|(_, descriptor)| *descriptor)
}

/// Accepted spellings for a canonical operation, in table order
pub fn synonyms_for(operation: Operation) -> Vec<&'static str> {
    SYNONYMS
        .iter()
        .filter(|(_, descriptor)| descriptor.operation == operation)
        .map(|(synonym, _)| *synonym)
        .collect()
}

/// Resolve `name` and evaluate it on the operands
///
/// The divisor guard runs before evaluation; a non-finite result (overflow) is
/// rejected so no record ever carries one.
pub fn resolve(name: &str, num1: f64, num2: f64) -> Result<Resolution, ApiError> {
    let descriptor = lookup(name).ok_or_else(|| ApiError::UnknownOperation(name.to_string()))?;

    if descriptor.rejects_zero_divisor && num2 == 0.0 {
        return Err(ApiError::DivisionByZero);
    }

    let result = (descriptor.apply)(num1, num2);
    if !result.is_finite() {
        return Err(ApiError::NonFiniteResult);
    }

    Ok(Resolution {
        operation: descriptor.operation,
        symbol: descriptor.symbol(),
        result,
    })
}

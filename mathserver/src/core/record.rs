//! Calculation record builder

use shared::{NewCalculation, Operation};

/// Assemble the payload handed to `HistoryStore::insert`
///
/// Identity and timestamp are left to the store.
pub fn build_record(num1: f64, num2: f64, operation: Operation, result: f64) -> NewCalculation {
    NewCalculation {
        num1,
        num2,
        operation,
        result,
    }
}

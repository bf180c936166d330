//! Service trait definitions for dependency injection
//!
//! The history store is the only I/O the server performs; it is abstracted
//! here so handlers can run against any backend.

use async_trait::async_trait;
use shared::{CalculationId, CalculationRecord, NewCalculation};

use crate::error::StoreResult;

/// Records returned by a history listing when no limit is given
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Upper bound applied to requested history limits
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Append-only calculation history
#[mockall::automock]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a calculation, assigning its id and timestamp
    ///
    /// On error nothing has been recorded.
    async fn insert(&self, calculation: NewCalculation) -> StoreResult<CalculationId>;

    /// Up to `limit` records, most recent first
    async fn list(&self, limit: usize) -> StoreResult<Vec<CalculationRecord>>;

    /// Fetch one record, `StoreError::NotFound` if the id is unknown
    async fn get_by_id(&self, id: &CalculationId) -> StoreResult<CalculationRecord>;
}

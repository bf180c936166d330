//! In-process history store
//!
//! `HistoryIndex` holds the ordered log shared by every backend;
//! `InMemoryHistoryStore` wraps it behind a lock and is the reference
//! implementation of `HistoryStore`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use shared::{CalculationId, CalculationRecord, NewCalculation};

use crate::error::{StoreError, StoreResult};
use crate::traits::HistoryStore;

/// Ordered, id-indexed calculation log
///
/// Records are kept in insertion order and their `(timestamp, sequence)` keys
/// strictly increase, so the newest record is always last.
#[derive(Debug, Default)]
pub struct HistoryIndex {
    records: Vec<CalculationRecord>,
    positions: HashMap<CalculationId, usize>,
}

impl HistoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assign id, timestamp and sequence without recording anything
    ///
    /// The timestamp never goes below the latest record's, even if the wall
    /// clock stepped back.
    pub fn prepare(&self, calculation: NewCalculation) -> CalculationRecord {
        let mut id = CalculationId::generate();
        while self.positions.contains_key(&id) {
            id = CalculationId::generate();
        }

        let now = Utc::now();
        let (timestamp, sequence) = match self.records.last() {
            Some(last) => (now.max(last.timestamp), last.sequence + 1),
            None => (now, 0),
        };

        CalculationRecord::from_new(calculation, id, timestamp, sequence)
    }

    /// Append a prepared or restored record
    pub fn commit(&mut self, record: CalculationRecord) -> StoreResult<()> {
        if self.positions.contains_key(&record.id) {
            return Err(StoreError::Conflict(format!("duplicate calculation id {}", record.id)));
        }
        if let Some(last) = self.records.last() {
            if record.recency_key() <= last.recency_key() {
                return Err(StoreError::Conflict(format!(
                    "calculation {} is not newer than {}",
                    record.id, last.id
                )));
            }
        }

        self.positions.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Up to `limit` records, newest first
    pub fn latest(&self, limit: usize) -> Vec<CalculationRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    pub fn get(&self, id: &CalculationId) -> Option<&CalculationRecord> {
        self.positions.get(id).map(|&position| &self.records[position])
    }
}

/// History store that lives for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    index: RwLock<HistoryIndex>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored calculations
    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn insert(&self, calculation: NewCalculation) -> StoreResult<CalculationId> {
        let mut index = self.index.write().await;
        let record = index.prepare(calculation);
        let id = record.id.clone();
        index.commit(record)?;

        info!(calculation_id = %id, total = index.len(), "📝 Stored calculation");
        Ok(id)
    }

    async fn list(&self, limit: usize) -> StoreResult<Vec<CalculationRecord>> {
        let records = self.index.read().await.latest(limit);
        debug!(limit, returned = records.len(), "Listed calculation history");
        Ok(records)
    }

    async fn get_by_id(&self, id: &CalculationId) -> StoreResult<CalculationRecord> {
        self.index
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

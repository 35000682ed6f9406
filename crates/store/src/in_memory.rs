//! In-memory store: useful for testing.

use async_trait::async_trait;
use pcparts_core::error::StoreError;
use pcparts_core::part::{PartRecord, encode_specs};
use pcparts_core::store::{PartStore, StoredPart};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A store that keeps rows in a Vec.
pub struct InMemoryStore {
    rows: Arc<RwLock<Vec<StoredPart>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Insert a row exactly as given, bypassing specs encoding.
    ///
    /// The row id is reassigned.
    pub async fn insert_raw(&self, mut row: StoredPart) -> i64 {
        let mut rows = self.rows.write().await;
        row.row_id = next_id(&rows);
        let id = row.row_id;
        rows.push(row);
        id
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id(rows: &[StoredPart]) -> i64 {
    rows.last().map(|r| r.row_id + 1).unwrap_or(1)
}

#[async_trait]
impl PartStore for InMemoryStore {
    fn name(&self) -> &str { "in_memory" }

    async fn create_table(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.rows.write().await.clear();
        Ok(())
    }

    async fn insert(&self, part: &PartRecord) -> Result<i64, StoreError> {
        let specs = encode_specs(&part.specs)
            .map_err(|e| StoreError::QueryFailed(format!("specs encoding: {e}")))?;
        let row = StoredPart {
            row_id: 0,
            category: part.category.clone(),
            name: part.name.clone(),
            brand: part.brand.clone(),
            price: part.price,
            specs,
            last_updated: part.last_updated.clone(),
        };
        Ok(self.insert_raw(row).await)
    }

    async fn select_all(&self) -> Result<Vec<StoredPart>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.rows.read().await.len())
    }
}

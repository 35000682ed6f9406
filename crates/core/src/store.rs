//! PartStore trait: the backing table the catalog is loaded from.
//!
//! The store is a plain table of rows with the specs column kept in its
//! stored textual form. Decoding and grouping happen in the loader, so a
//! store implementation never has to understand specs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::StoreError;
use crate::part::PartRecord;

/// One raw row of the `parts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPart {
    /// Row number assigned by the store; only used in diagnostics.
    pub row_id: i64,
    pub category: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    /// Specs in stored (JSON) text form.
    pub specs: String,
    pub last_updated: String,
}

/// The core PartStore trait.
///
/// Implementations: SQLite, in-memory (for testing).
#[async_trait]
pub trait PartStore: Send + Sync {
    /// The backend name (e.g., "sqlite").
    fn name(&self) -> &str;

    /// Create the parts table if it does not exist.
    async fn create_table(&self) -> std::result::Result<(), StoreError>;

    /// Delete every row.
    async fn clear(&self) -> std::result::Result<(), StoreError>;

    /// Insert one part; returns its row id.
    async fn insert(&self, part: &PartRecord) -> std::result::Result<i64, StoreError>;

    /// Every row, in row-id order.
    async fn select_all(&self) -> std::result::Result<Vec<StoredPart>, StoreError>;

    async fn count(&self) -> std::result::Result<usize, StoreError>;

    /// Replace the whole table with `parts`. Returns the number inserted.
    async fn replace_all(&self, parts: &[PartRecord]) -> std::result::Result<usize, StoreError> {
        self.create_table().await?;
        self.clear().await?;
        for part in parts {
            self.insert(part).await?;
        }
        Ok(parts.len())
    }
}

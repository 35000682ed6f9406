//! SQLite part store.
//!
//! A single table holds every part:
//!
//! ```sql
//! parts(id INTEGER PRIMARY KEY AUTOINCREMENT, category TEXT, name TEXT,
//!       brand TEXT, price REAL, specs TEXT, last_updated TEXT)
//! ```
//!
//! `specs` is stored as JSON text and decoded by the loader.

use async_trait::async_trait;
use pcparts_core::error::StoreError;
use pcparts_core::part::{PartRecord, encode_specs};
use pcparts_core::store::{PartStore, StoredPart};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, Sqlite, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open an existing database for reading.
    ///
    /// The file is never created here: a missing database is
    /// [`StoreError::Unavailable`].
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| {
                StoreError::Unavailable(format!("Failed to open {}: {e}", path.display()))
            })?;

        info!("SQLite part store opened at {}", path.display());
        Ok(Self { pool })
    }

    /// Open or create a database for writing, with the parts table in place.
    pub async fn create(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                StoreError::Unavailable(format!("Failed to create {}: {e}", path.display()))
            })?;

        let store = Self { pool };
        store.create_table().await?;
        info!("SQLite part store ready at {}", path.display());
        Ok(store)
    }

    /// An ephemeral in-process database (useful for tests).
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Unavailable(format!("Invalid SQLite URL: {e}")))?;

        // One connection: every connection to :memory: is a separate database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.create_table().await?;
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Parse a `StoredPart` from a SQLite row.
    fn row_to_part(row: &sqlx::sqlite::SqliteRow) -> Result<StoredPart, StoreError> {
        let column_err = |col: &str, e: sqlx::Error| StoreError::QueryFailed(format!("{col} column: {e}"));

        Ok(StoredPart {
            row_id: row.try_get("id").map_err(|e| column_err("id", e))?,
            category: row.try_get("category").map_err(|e| column_err("category", e))?,
            name: row.try_get("name").map_err(|e| column_err("name", e))?,
            brand: row.try_get("brand").map_err(|e| column_err("brand", e))?,
            price: row.try_get("price").map_err(|e| column_err("price", e))?,
            specs: row.try_get("specs").map_err(|e| column_err("specs", e))?,
            last_updated: row
                .try_get("last_updated")
                .map_err(|e| column_err("last_updated", e))?,
        })
    }

    async fn insert_with<'e, E>(executor: E, part: &PartRecord) -> Result<i64, StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let specs = encode_specs(&part.specs)
            .map_err(|e| StoreError::QueryFailed(format!("specs encoding: {e}")))?;

        let result = sqlx::query(
            r#"
            INSERT INTO parts (category, name, brand, price, specs, last_updated)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&part.category)
        .bind(&part.name)
        .bind(&part.brand)
        .bind(part.price)
        .bind(&specs)
        .bind(&part.last_updated)
        .execute(executor)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("INSERT failed: {e}")))?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl PartStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn create_table(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS parts (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                category     TEXT,
                name         TEXT,
                brand        TEXT,
                price        REAL,
                specs        TEXT,
                last_updated TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("parts table: {e}")))?;

        debug!("parts table ready");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM parts")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("DELETE failed: {e}")))?;
        Ok(())
    }

    async fn insert(&self, part: &PartRecord) -> Result<i64, StoreError> {
        Self::insert_with(&self.pool, part).await
    }

    async fn select_all(&self) -> Result<Vec<StoredPart>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, category, name, brand, price, specs, last_updated FROM parts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(format!("Failed to read parts: {e}")))?;

        rows.iter().map(Self::row_to_part).collect()
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM parts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("COUNT failed: {e}")))?;
        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| StoreError::QueryFailed(format!("count column: {e}")))?;
        Ok(count as usize)
    }

    /// Delete and re-insert inside one transaction.
    async fn replace_all(&self, parts: &[PartRecord]) -> Result<usize, StoreError> {
        self.create_table().await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::QueryFailed(format!("BEGIN failed: {e}")))?;

        sqlx::query("DELETE FROM parts")
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("DELETE failed: {e}")))?;

        for part in parts {
            Self::insert_with(&mut *tx, part).await?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::QueryFailed(format!("COMMIT failed: {e}")))?;

        info!(count = parts.len(), "Replaced part table contents");
        Ok(parts.len())
    }
}

//! `pcparts import`: Replace the parts table from a JSON file.
//!
//! The file holds an array of part objects:
//!
//! ```json
//! [{"category": "cpu", "name": "Ryzen 5 7600", "brand": "AMD",
//!   "price": 6490, "specs": {"cores": 6}, "last_updated": "2025-03-10"}]
//! ```

use pcparts_core::part::PartRecord;
use pcparts_core::store::PartStore;
use pcparts_store::SqliteStore;
use std::path::Path;
use tracing::info;

use super::load_config;

pub async fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let parts: Vec<PartRecord> = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse {}: {e}", file.display()))?;

    let db_path = config.store.resolved_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = SqliteStore::create(&db_path).await?;
    let inserted = store.replace_all(&parts).await?;
    info!(file = %file.display(), inserted, "Import complete");

    println!("Imported {inserted} parts into {}", db_path.display());

    Ok(())
}

//! Catalog loader: turns store rows into the in-memory [`CatalogIndex`].

use chrono::NaiveDate;
use pcparts_core::catalog::CatalogIndex;
use pcparts_core::error::StoreError;
use pcparts_core::part::{PartRecord, parse_specs};
use pcparts_core::store::{PartStore, StoredPart};
use tracing::{info, warn};

/// Read every row once and group the parts by lowercased category.
///
/// A row whose specs cannot be decoded rejects the whole load with
/// [`StoreError::MalformedSpecs`].
pub async fn load_catalog(store: &dyn PartStore) -> Result<CatalogIndex, StoreError> {
    let rows = store.select_all().await?;
    let records = rows
        .into_iter()
        .map(decode_row)
        .collect::<Result<Vec<_>, _>>()?;

    let index = CatalogIndex::from_records(records);
    info!(
        backend = store.name(),
        parts = index.len(),
        categories = index.category_count(),
        latest_update = index.latest_update(),
        "Catalog loaded"
    );
    Ok(index)
}

/// Decode one stored row into a [`PartRecord`].
pub fn decode_row(row: StoredPart) -> Result<PartRecord, StoreError> {
    let specs = parse_specs(&row.specs).map_err(|e| StoreError::MalformedSpecs {
        row: row.row_id,
        reason: e.to_string(),
    })?;

    if NaiveDate::parse_from_str(&row.last_updated, "%Y-%m-%d").is_err() {
        warn!(
            row = row.row_id,
            last_updated = %row.last_updated,
            "last_updated is not YYYY-MM-DD; freshness ordering may be wrong"
        );
    }

    if row.price < 0.0 {
        warn!(row = row.row_id, price = row.price, "negative part price");
    }

    Ok(PartRecord {
        category: row.category,
        name: row.name,
        brand: row.brand,
        price: row.price,
        specs,
        last_updated: row.last_updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryStore;
    use pcparts_core::part::SpecValue;

    fn raw(category: &str, name: &str, specs: &str) -> StoredPart {
        StoredPart {
            row_id: 0,
            category: category.into(),
            name: name.into(),
            brand: "Brand".into(),
            price: 1_000.0,
            specs: specs.into(),
            last_updated: "2025-03-01".into(),
        }
    }

    #[tokio::test]
    async fn groups_rows_by_lowercased_category() {
        let store = InMemoryStore::new();
        store.insert_raw(raw("CPU", "first", "{}")).await;
        store.insert_raw(raw("gpu", "second", "{}")).await;
        store.insert_raw(raw("cpu", "third", r#"{"cores": 8}"#)).await;

        let index = load_catalog(&store).await.unwrap();
        let cpus: Vec<&str> = index.get("cpu").unwrap().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(cpus, vec!["first", "third"]);
        assert_eq!(index.get("gpu").unwrap().len(), 1);
        assert_eq!(
            index.get("cpu").unwrap()[1].specs["cores"],
            SpecValue::Integer(8)
        );
    }

    #[tokio::test]
    async fn malformed_specs_rejects_load() {
        let store = InMemoryStore::new();
        store.insert_raw(raw("cpu", "ok", "{}")).await;
        let bad = store
            .insert_raw(raw("cpu", "bad", "{'cores': 8}"))
            .await;

        let err = load_catalog(&store).await.unwrap_err();
        match err {
            StoreError::MalformedSpecs { row, .. } => assert_eq!(row, bad),
            other => panic!("expected MalformedSpecs, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_store_gives_empty_index() {
        let store = InMemoryStore::new();
        let index = load_catalog(&store).await.unwrap();
        assert!(index.is_empty());
        assert_eq!(index.latest_update(), "1970-01-01");
    }

    #[test]
    fn odd_dates_still_load() {
        let mut row = raw("ram", "DDR5", "{}");
        row.last_updated = "March 2025".into();
        let part = decode_row(row).unwrap();
        assert_eq!(part.last_updated, "March 2025");
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn loads_from_sqlite() {
        use crate::sqlite::SqliteStore;

        let store = SqliteStore::in_memory().await.unwrap();
        store
            .insert(&PartRecord::new("PSU", "RM750e", "Corsair", 2_990.0, "2025-02-14").with_spec("watts", 750_i64))
            .await
            .unwrap();

        let index = load_catalog(&store).await.unwrap();
        let psus = index.get("psu").unwrap();
        assert_eq!(psus[0].name, "RM750e");
        assert_eq!(psus[0].specs["watts"], SpecValue::Integer(750));
    }
}

//! Catalog index: the immutable, category-grouped view of all parts.
//!
//! Built once at startup from the store and never mutated afterwards,
//! so it can be shared behind an `Arc` without locking.

use std::collections::HashMap;

use crate::part::PartRecord;

/// Returned by [`CatalogIndex::latest_update`] when the catalog is empty.
pub const EPOCH_DATE: &str = "1970-01-01";

/// Parts grouped by lowercased category.
///
/// Categories iterate in the order they were first seen during load;
/// parts within a category keep their load order.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    order: Vec<String>,
    parts: HashMap<String, Vec<PartRecord>>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records by `category.to_lowercase()`, preserving input order.
    pub fn from_records(records: impl IntoIterator<Item = PartRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.push(record);
        }
        index
    }

    fn push(&mut self, record: PartRecord) {
        let key = record.category_key();
        match self.parts.get_mut(&key) {
            Some(bucket) => bucket.push(record),
            None => {
                self.order.push(key.clone());
                self.parts.insert(key, vec![record]);
            }
        }
    }

    /// Parts of one category, looked up case-insensitively.
    pub fn get(&self, category: &str) -> Option<&[PartRecord]> {
        self.parts
            .get(&category.to_lowercase())
            .map(|v| v.as_slice())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.parts.contains_key(&category.to_lowercase())
    }

    /// Category keys in load order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// `(category, parts)` pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PartRecord])> {
        self.order
            .iter()
            .filter_map(|key| self.parts.get(key).map(|v| (key.as_str(), v.as_slice())))
    }

    /// Every part, category by category.
    pub fn parts(&self) -> impl Iterator<Item = &PartRecord> {
        self.iter().flat_map(|(_, parts)| parts.iter())
    }

    /// Total number of parts.
    pub fn len(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.order.len()
    }

    /// Parts with `min_price <= price <= max_price`, in category then load order.
    ///
    /// Callers are expected to pass `min_price <= max_price`; reversed bounds
    /// simply match nothing.
    pub fn in_price_range(&self, min_price: f64, max_price: f64) -> Vec<&PartRecord> {
        self.parts()
            .filter(|p| min_price <= p.price && p.price <= max_price)
            .collect()
    }

    /// The lexically greatest `last_updated`, or [`EPOCH_DATE`] when empty.
    pub fn latest_update(&self) -> &str {
        self.parts()
            .map(|p| p.last_updated.as_str())
            .fold(EPOCH_DATE, |latest, d| if d > latest { d } else { latest })
    }
}

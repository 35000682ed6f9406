//! Part records: one hardware item in the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form technical attributes of a part (cores, VRAM, wattage, ...).
pub type Specs = BTreeMap<String, SpecValue>;

/// A single spec value.
///
/// Specs have no fixed schema, so values are a small tagged union rather
/// than a rigid struct. Serialized untagged, so the stored form is plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<SpecValue>),
    Map(Specs),
}

impl From<&str> for SpecValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SpecValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for SpecValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Integer)
    }
}

impl From<f64> for SpecValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SpecValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One hardware item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    /// Category such as "cpu" or "gpu". Compared case-insensitively.
    pub category: String,

    /// Display name. Not unique.
    pub name: String,

    pub brand: String,

    /// Non-negative currency amount.
    pub price: f64,

    #[serde(default)]
    pub specs: Specs,

    /// `YYYY-MM-DD`, so string order is chronological order.
    #[serde(alias = "lastUpdated")]
    pub last_updated: String,
}

impl PartRecord {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            brand: brand.into(),
            price,
            specs: Specs::new(),
            last_updated: last_updated.into(),
        }
    }

    /// Builder-style helper to attach a spec entry.
    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.specs.insert(key.into(), value.into());
        self
    }

    /// The lowercased category, i.e. the key this part is indexed under.
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }
}

/// Decode the stored textual form of a specs field.
///
/// The top level must be a JSON object.
pub fn parse_specs(text: &str) -> Result<Specs, serde_json::Error> {
    serde_json::from_str(text)
}

/// Encode specs to their stored textual form.
pub fn encode_specs(specs: &Specs) -> Result<String, serde_json::Error> {
    serde_json::to_string(specs)
}

//! Price freshness resource: when the catalog was last updated.

use async_trait::async_trait;
use pcparts_core::catalog::CatalogIndex;
use pcparts_core::error::ToolError;
use pcparts_core::resource::Resource;
use std::sync::Arc;

use crate::render::Renderer;

pub const PRICE_FRESHNESS_URI: &str = "file:///price/last_update";

pub struct PriceFreshnessResource {
    index: Arc<CatalogIndex>,
    renderer: Renderer,
}

impl PriceFreshnessResource {
    pub fn new(index: Arc<CatalogIndex>, renderer: Renderer) -> Self {
        Self { index, renderer }
    }
}

#[async_trait]
impl Resource for PriceFreshnessResource {
    fn uri(&self) -> &str {
        PRICE_FRESHNESS_URI
    }

    fn name(&self) -> &str {
        "price_last_update"
    }

    fn description(&self) -> &str {
        "Date of the most recent price update across the whole catalog"
    }

    async fn read(&self) -> Result<String, ToolError> {
        Ok(self.renderer.freshness(self.index.latest_update()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcparts_core::part::PartRecord;

    #[tokio::test]
    async fn reports_latest_date() {
        let index = CatalogIndex::from_records(vec![
            PartRecord::new("cpu", "A", "AMD", 1.0, "2025-01-09"),
            PartRecord::new("case", "B", "Fractal", 1.0, "2025-03-15"),
            PartRecord::new("gpu", "C", "NVIDIA", 1.0, "2024-12-31"),
        ]);
        let resource = PriceFreshnessResource::new(Arc::new(index), Renderer::default());
        assert_eq!(resource.read().await.unwrap(), "Prices last updated: 2025-03-15");
    }

    #[tokio::test]
    async fn empty_catalog_reports_epoch() {
        let resource =
            PriceFreshnessResource::new(Arc::new(CatalogIndex::new()), Renderer::default());
        assert_eq!(resource.read().await.unwrap(), "Prices last updated: 1970-01-01");
    }
}

//! Catalog tools for pcparts.
//!
//! Each operation the service exposes is a [`Tool`](pcparts_core::Tool)
//! over a shared, immutable [`CatalogIndex`]; freshness is exposed as a
//! read-only [`Resource`](pcparts_core::Resource).

pub mod find_parts_by_price_range;
pub mod list_parts_by_category;
pub mod price_freshness;
pub mod render;
pub mod suggest_pc_build;

use pcparts_core::catalog::CatalogIndex;
use pcparts_core::resource::ResourceRegistry;
use pcparts_core::tool::ToolRegistry;
use std::sync::Arc;

pub use price_freshness::PRICE_FRESHNESS_URI;
pub use render::Renderer;

/// Registry with the three catalog query tools.
pub fn catalog_registry(index: Arc<CatalogIndex>, renderer: Renderer) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(list_parts_by_category::ListPartsByCategoryTool::new(
        index.clone(),
        renderer.clone(),
    )));
    registry.register(Box::new(
        find_parts_by_price_range::FindPartsByPriceRangeTool::new(index.clone(), renderer.clone()),
    ));
    registry.register(Box::new(suggest_pc_build::SuggestPcBuildTool::new(
        index, renderer,
    )));
    registry
}

/// Registry with the price freshness resource.
pub fn catalog_resources(index: Arc<CatalogIndex>, renderer: Renderer) -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    registry.register(Box::new(price_freshness::PriceFreshnessResource::new(
        index, renderer,
    )));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_exposes_three_tools() {
        let registry = catalog_registry(Arc::new(CatalogIndex::new()), Renderer::default());
        assert_eq!(
            registry.names(),
            vec![
                "find_parts_by_price_range",
                "list_parts_by_category",
                "suggest_pc_build"
            ]
        );
        for def in registry.definitions() {
            assert_eq!(def.parameters["type"], "object");
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn resources_expose_freshness() {
        let resources = catalog_resources(Arc::new(CatalogIndex::new()), Renderer::default());
        assert!(resources.get(PRICE_FRESHNESS_URI).is_some());
    }
}

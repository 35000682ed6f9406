//! `find_parts_by_price_range`: parts across all categories within a price band.

use async_trait::async_trait;
use pcparts_core::catalog::CatalogIndex;
use pcparts_core::error::ToolError;
use pcparts_core::tool::{Tool, ToolResult, number_arg};
use std::sync::Arc;

use crate::render::Renderer;

pub struct FindPartsByPriceRangeTool {
    index: Arc<CatalogIndex>,
    renderer: Renderer,
}

impl FindPartsByPriceRangeTool {
    pub fn new(index: Arc<CatalogIndex>, renderer: Renderer) -> Self {
        Self { index, renderer }
    }
}

#[async_trait]
impl Tool for FindPartsByPriceRangeTool {
    fn name(&self) -> &str {
        "find_parts_by_price_range"
    }

    fn description(&self) -> &str {
        "Find parts in every category whose price lies within [min_price, max_price], inclusive."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "min_price": {
                    "type": "number",
                    "description": "Lowest price to include"
                },
                "max_price": {
                    "type": "number",
                    "description": "Highest price to include; must not be below min_price"
                }
            },
            "required": ["min_price", "max_price"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let min_price = number_arg(&arguments, "min_price")?;
        let max_price = number_arg(&arguments, "max_price")?;

        if min_price > max_price {
            return Err(ToolError::InvalidArguments(format!(
                "min_price ({min_price}) must not exceed max_price ({max_price})"
            )));
        }

        let parts = self.index.in_price_range(min_price, max_price);
        tracing::debug!(min_price, max_price, matches = parts.len(), "price range query");

        Ok(
            ToolResult::text(self.renderer.price_range(min_price, max_price, &parts))
                .with_data(serde_json::json!({ "count": parts.len() })),
        )
    }
}

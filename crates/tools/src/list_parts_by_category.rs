//! `list_parts_by_category`: every part in one category.
//!
//! An unknown category is not an error: the result lists the categories
//! that do exist.

use async_trait::async_trait;
use pcparts_core::catalog::CatalogIndex;
use pcparts_core::error::ToolError;
use pcparts_core::tool::{Tool, ToolResult, str_arg};
use std::sync::Arc;

use crate::render::Renderer;

pub struct ListPartsByCategoryTool {
    index: Arc<CatalogIndex>,
    renderer: Renderer,
}

impl ListPartsByCategoryTool {
    pub fn new(index: Arc<CatalogIndex>, renderer: Renderer) -> Self {
        Self { index, renderer }
    }
}

#[async_trait]
impl Tool for ListPartsByCategoryTool {
    fn name(&self) -> &str {
        "list_parts_by_category"
    }

    fn description(&self) -> &str {
        "List every part in a category (e.g. cpu, gpu, motherboard, ram, psu, case) with brand, price, specs and last-updated date."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Part category, case-insensitive, e.g. 'cpu' or 'gpu'"
                }
            },
            "required": ["category"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let category = str_arg(&arguments, "category")?.to_lowercase();

        let Some(parts) = self.index.get(&category) else {
            let available: Vec<&str> = self.index.categories().collect();
            return Ok(
                ToolResult::text(self.renderer.unknown_category(&category, available.iter().copied()))
                    .with_data(serde_json::json!({
                        "found": false,
                        "category": category,
                        "available": available,
                    })),
            );
        };

        Ok(ToolResult::text(self.renderer.category(&category, parts)).with_data(
            serde_json::json!({
                "found": true,
                "category": category,
                "count": parts.len(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcparts_core::part::PartRecord;

    fn tool() -> ListPartsByCategoryTool {
        let index = CatalogIndex::from_records(vec![
            PartRecord::new("GPU", "RTX 4070 Super", "ASUS", 21_990.0, "2025-03-01"),
            PartRecord::new("cpu", "Core i7-14700K", "Intel", 13_490.0, "2025-02-01"),
            PartRecord::new("gpu", "RX 7800 XT", "Sapphire", 17_490.0, "2025-03-03"),
        ]);
        ListPartsByCategoryTool::new(Arc::new(index), Renderer::default())
    }

    #[tokio::test]
    async fn lists_category_in_index_order() {
        let result = tool()
            .execute(serde_json::json!({"category": "Gpu"}))
            .await
            .unwrap();

        let first = result.output.find("RTX 4070 Super").unwrap();
        let second = result.output.find("RX 7800 XT").unwrap();
        assert!(first < second);
        assert!(!result.output.contains("Core i7-14700K"));
        assert_eq!(result.data.unwrap()["count"], 2);
    }

    #[tokio::test]
    async fn unknown_category_is_informational() {
        let result = tool()
            .execute(serde_json::json!({"category": "NIC"}))
            .await
            .unwrap();

        assert_eq!(
            result.output,
            "Category not found: nic. Available categories: gpu, cpu"
        );
        assert_eq!(result.data.unwrap()["found"], false);
    }

    #[tokio::test]
    async fn missing_argument_is_invalid() {
        let err = tool().execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let t = tool();
        let a = t.execute(serde_json::json!({"category": "cpu"})).await.unwrap();
        let b = t.execute(serde_json::json!({"category": "cpu"})).await.unwrap();
        assert_eq!(a.output, b.output);
    }
}

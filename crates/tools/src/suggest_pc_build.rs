//! `suggest_pc_build`: a balanced six-part build for a total budget.
//!
//! A low budget yields an advisory result (`data.advisory = true`);
//! a catalog missing a required category yields [`ToolError::Catalog`].

use async_trait::async_trait;
use pcparts_core::build::{BuildOutcome, suggest_build};
use pcparts_core::catalog::CatalogIndex;
use pcparts_core::error::ToolError;
use pcparts_core::tool::{Tool, ToolResult, number_arg};
use std::sync::Arc;
use tracing::{info, warn};

use crate::render::Renderer;

pub struct SuggestPcBuildTool {
    index: Arc<CatalogIndex>,
    renderer: Renderer,
}

impl SuggestPcBuildTool {
    pub fn new(index: Arc<CatalogIndex>, renderer: Renderer) -> Self {
        Self { index, renderer }
    }
}

#[async_trait]
impl Tool for SuggestPcBuildTool {
    fn name(&self) -> &str {
        "suggest_pc_build"
    }

    fn description(&self) -> &str {
        "Suggest a PC build for a total budget, splitting it evenly across CPU, GPU, motherboard, RAM, power supply and case."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "budget": {
                    "type": "number",
                    "description": "Total budget for the build"
                }
            },
            "required": ["budget"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let budget = number_arg(&arguments, "budget")?;

        let outcome = suggest_build(&self.index, budget).inspect_err(|e| {
            warn!(budget, error = %e, "build suggestion failed");
        })?;

        match outcome {
            BuildOutcome::Advisory(advisory) => Ok(ToolResult::text(
                self.renderer.advisory(&advisory),
            )
            .with_data(serde_json::json!({
                "advisory": true,
                "minimum": advisory.minimum,
            }))),
            BuildOutcome::Suggested(suggestion) => {
                info!(
                    budget,
                    total = suggestion.total,
                    remaining = suggestion.remaining,
                    "build suggested"
                );
                let mut result = ToolResult::text(self.renderer.build(&suggestion));
                if let Ok(value) = serde_json::to_value(&suggestion) {
                    result = result.with_data(serde_json::json!({
                        "advisory": false,
                        "suggestion": value,
                    }));
                }
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcparts_core::build::BUILD_CATEGORIES;
    use pcparts_core::error::CatalogError;
    use pcparts_core::part::PartRecord;

    fn catalog(skip: Option<&str>) -> Arc<CatalogIndex> {
        let mut records = Vec::new();
        for (i, cat) in BUILD_CATEGORIES.iter().enumerate() {
            if Some(*cat) == skip {
                continue;
            }
            let base = 2_000.0 * (i as f64 + 1.0);
            records.push(PartRecord::new(*cat, format!("{cat} basic"), "Acme", base, "2025-03-01"));
            records.push(PartRecord::new(*cat, format!("{cat} pro"), "Acme", base * 3.0, "2025-03-01"));
        }
        Arc::new(CatalogIndex::from_records(records))
    }

    fn tool(skip: Option<&str>) -> SuggestPcBuildTool {
        SuggestPcBuildTool::new(catalog(skip), Renderer::default())
    }

    #[tokio::test]
    async fn low_budget_advisory() {
        let result = tool(None)
            .execute(serde_json::json!({"budget": 18000}))
            .await
            .unwrap();

        assert_eq!(
            result.output,
            "Budget too low: at least NT$ 20,000 is recommended to assemble a basic build"
        );
        assert_eq!(result.data.unwrap()["advisory"], true);
    }

    #[tokio::test]
    async fn renders_six_picks_and_remaining() {
        let result = tool(None)
            .execute(serde_json::json!({"budget": 120000}))
            .await
            .unwrap();

        let data = result.data.unwrap();
        assert_eq!(data["advisory"], false);
        let suggestion = &data["suggestion"];
        assert_eq!(suggestion["picks"].as_array().unwrap().len(), 6);

        let total = suggestion["total"].as_f64().unwrap();
        let remaining = suggestion["remaining"].as_f64().unwrap();
        assert_eq!(remaining, 120_000.0 - total);

        assert!(result.output.starts_with("Suggested build for a budget of NT$ 120,000:"));
        assert!(result.output.contains("Remaining budget: NT$ "));
        assert!(result.output.ends_with("storage, cooling and other accessories)"));
    }

    #[tokio::test]
    async fn missing_category_is_an_error() {
        let err = tool(Some("psu"))
            .execute(serde_json::json!({"budget": 100000}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Catalog(CatalogError::CategoryMissing(ref c)) if c == "psu"
        ));
    }

    #[tokio::test]
    async fn missing_budget_is_invalid() {
        let err = tool(None).execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}

//! `pcparts list | price-range | suggest | last-update`: one-shot queries.
//!
//! Each command runs the same tool or resource the gateway serves and
//! prints its rendered output.

use pcparts_core::tool::ToolCall;
use pcparts_tools::{PRICE_FRESHNESS_URI, catalog_registry, catalog_resources};

use super::{load_config, open_catalog, renderer};

async fn run_tool(name: &str, arguments: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let catalog = open_catalog(&config).await?;
    let registry = catalog_registry(catalog, renderer(&config));

    let call = ToolCall {
        id: "cli".into(),
        name: name.into(),
        arguments,
    };
    let result = registry.execute(&call).await?;
    println!("{}", result.output);

    Ok(())
}

pub async fn list(category: &str) -> Result<(), Box<dyn std::error::Error>> {
    run_tool(
        "list_parts_by_category",
        serde_json::json!({ "category": category }),
    )
    .await
}

pub async fn price_range(min: f64, max: f64) -> Result<(), Box<dyn std::error::Error>> {
    run_tool(
        "find_parts_by_price_range",
        serde_json::json!({ "min_price": min, "max_price": max }),
    )
    .await
}

pub async fn suggest(budget: f64) -> Result<(), Box<dyn std::error::Error>> {
    run_tool("suggest_pc_build", serde_json::json!({ "budget": budget })).await
}

pub async fn last_update() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let catalog = open_catalog(&config).await?;
    let resources = catalog_resources(catalog, renderer(&config));

    println!("{}", resources.read(PRICE_FRESHNESS_URI).await?);

    Ok(())
}

//! `pcparts status`: Show configuration and catalog status.

use pcparts_config::AppConfig;
use pcparts_core::store::PartStore;
use pcparts_store::load_catalog;

use super::{load_config, open_store};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let config_path = AppConfig::config_dir().join("config.toml");
    let db_path = config.store.resolved_path();

    println!("pcparts status");
    println!("==============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!(
        "  Config file:  {}",
        if config_path.exists() { "found" } else { "not found (using defaults)" }
    );
    println!("  Database:     {}", db_path.display());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!("  Currency:     {}", config.display.currency);

    if !db_path.exists() {
        println!("\n  No database yet. Run `pcparts import <file>` first.");
        return Ok(());
    }

    let store = open_store(&config).await?;
    println!("\n  Rows:         {}", store.count().await?);

    let catalog = load_catalog(&store).await?;
    for (category, parts) in catalog.iter() {
        println!("    {category:<12} {}", parts.len());
    }
    println!("  Last update:  {}", catalog.latest_update());

    Ok(())
}

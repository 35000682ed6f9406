pub mod import;
pub mod init;
pub mod query;
pub mod serve;
pub mod status;
pub mod stdio;

use pcparts_config::AppConfig;
use pcparts_core::catalog::CatalogIndex;
use pcparts_store::{SqliteStore, load_catalog};
use pcparts_tools::Renderer;
use std::sync::Arc;

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub async fn open_store(config: &AppConfig) -> Result<SqliteStore, Box<dyn std::error::Error>> {
    let path = config.store.resolved_path();
    let store = SqliteStore::open(&path, config.store.max_connections)
        .await
        .map_err(|e| format!("{e} (run `pcparts import <file>` to create it)"))?;
    Ok(store)
}

/// Open the configured store and build the catalog index from it.
pub async fn open_catalog(config: &AppConfig) -> Result<Arc<CatalogIndex>, Box<dyn std::error::Error>> {
    let store = open_store(config).await?;
    let index = load_catalog(&store).await?;
    Ok(Arc::new(index))
}

pub fn renderer(config: &AppConfig) -> Renderer {
    Renderer::new(config.display.currency.clone())
}

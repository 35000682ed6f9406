//! `pcparts stdio`: JSON-RPC over stdin/stdout for agent runtimes.

use pcparts_gateway::GatewayState;
use std::sync::Arc;

use super::{load_config, open_catalog, renderer};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let catalog = open_catalog(&config).await?;
    let state = Arc::new(GatewayState::new(catalog, renderer(&config)));

    pcparts_gateway::stdio::serve_stdio(state).await?;

    Ok(())
}

//! `pcparts serve`: Start the HTTP gateway.

use pcparts_gateway::GatewayState;
use std::sync::Arc;

use super::{load_config, open_catalog, renderer};

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let catalog = open_catalog(&config).await?;
    let state = Arc::new(GatewayState::new(catalog, renderer(&config)));

    println!("pcparts gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Parts:     {}", state.catalog.len());

    pcparts_gateway::start(&config, state).await?;

    Ok(())
}

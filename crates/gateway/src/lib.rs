//! Hosts for the pcparts catalog tools.
//!
//! - HTTP (Axum): health check plus the v1 tool and resource API
//! - stdio: line-delimited JSON-RPC 2.0 for MCP-style agent runtimes
//!
//! Both hosts share one [`GatewayState`] built around an immutable
//! catalog index, so no locking is needed.

pub mod api_v1;
pub mod stdio;

use axum::{Router, extract::State, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use pcparts_core::catalog::CatalogIndex;
use pcparts_core::resource::ResourceRegistry;
use pcparts_core::tool::ToolRegistry;
use pcparts_tools::Renderer;

/// Shared application state for both hosts.
pub struct GatewayState {
    pub catalog: Arc<CatalogIndex>,
    pub tools: ToolRegistry,
    pub resources: ResourceRegistry,
}

impl GatewayState {
    /// Build the catalog tools and resources over `catalog`.
    pub fn new(catalog: Arc<CatalogIndex>, renderer: Renderer) -> Self {
        Self {
            tools: pcparts_tools::catalog_registry(catalog.clone(), renderer.clone()),
            resources: pcparts_tools::catalog_resources(catalog.clone(), renderer),
            catalog,
        }
    }
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone())
        .nest("/v1", api_v1::v1_router(state))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(
    config: &pcparts_config::AppConfig,
    state: SharedState,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub parts: usize,
    pub categories: usize,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        parts: state.catalog.len(),
        categories: state.catalog.category_count(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use pcparts_core::build::BUILD_CATEGORIES;
    use pcparts_core::part::PartRecord;

    /// Two parts in each build category.
    pub fn test_state() -> SharedState {
        let mut records = Vec::new();
        for (i, cat) in BUILD_CATEGORIES.iter().enumerate() {
            let base = 1_500.0 * (i as f64 + 1.0);
            records.push(PartRecord::new(*cat, format!("{cat} value"), "Acme", base, "2025-02-01"));
            records.push(PartRecord::new(*cat, format!("{cat} plus"), "Acme", base * 2.0, "2025-03-01"));
        }
        let catalog = Arc::new(CatalogIndex::from_records(records));
        Arc::new(GatewayState::new(catalog, Renderer::default()))
    }
}

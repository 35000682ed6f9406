//! HTTP API v1: tool and resource endpoints.
//!
//! Endpoints:
//!
//! - `GET  /v1/tools`: List available tools
//! - `POST /v1/tools/call`: Execute a tool call
//! - `GET  /v1/resources`: List readable resources
//! - `GET  /v1/resources/read?uri=…`: Read one resource

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use pcparts_core::error::ToolError;
use pcparts_core::resource::ResourceDefinition;
use pcparts_core::tool::{ToolCall, ToolDefinition, ToolResult};

use crate::SharedState;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the v1 API router. Nest this under "/v1" in the main router.
pub fn v1_router(state: SharedState) -> Router {
    Router::new()
        .route("/tools", get(list_tools_handler))
        .route("/tools/call", post(call_tool_handler))
        .route("/resources", get(list_resources_handler))
        .route("/resources/read", get(read_resource_handler))
        .with_state(state)
}

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDefinition>,
    pub count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ResourceListResponse {
    pub resources: Vec<ResourceDefinition>,
    pub count: usize,
}

#[derive(Deserialize)]
pub struct ReadResourceQuery {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a tool-boundary error to an HTTP status.
pub fn tool_error_status(err: &ToolError) -> StatusCode {
    match err {
        ToolError::NotFound(_) | ToolError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
        ToolError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
        ToolError::Catalog(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn api_error(err: ToolError) -> ApiError {
    (
        tool_error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn list_tools_handler(State(state): State<SharedState>) -> Json<ToolListResponse> {
    let tools = state.tools.definitions();
    let count = tools.len();
    Json(ToolListResponse { tools, count })
}

async fn call_tool_handler(
    State(state): State<SharedState>,
    Json(call): Json<ToolCall>,
) -> Result<Json<ToolResult>, ApiError> {
    info!(tool = %call.name, call_id = %call.id, "Tool call received");

    match state.tools.execute(&call).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            warn!(tool = %call.name, error = %e, "Tool call failed");
            Err(api_error(e))
        }
    }
}

async fn list_resources_handler(State(state): State<SharedState>) -> Json<ResourceListResponse> {
    let resources = state.resources.definitions();
    let count = resources.len();
    Json(ResourceListResponse { resources, count })
}

async fn read_resource_handler(
    State(state): State<SharedState>,
    Query(query): Query<ReadResourceQuery>,
) -> Result<Json<ResourceContents>, ApiError> {
    let resource = state
        .resources
        .get(&query.uri)
        .ok_or_else(|| api_error(ToolError::ResourceNotFound(query.uri.clone())))?;

    let text = resource.read().await.map_err(api_error)?;
    Ok(Json(ResourceContents {
        uri: query.uri,
        mime_type: resource.mime_type().to_string(),
        text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn call_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/tools/call")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn list_tools() {
        let app = v1_router(test_state());

        let req = Request::builder()
            .uri("/tools")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: ToolListResponse = body_json(response).await;
        assert_eq!(json.count, 3);
        assert!(json.tools.iter().any(|t| t.name == "list_parts_by_category"));
        assert!(json.tools.iter().any(|t| t.name == "find_parts_by_price_range"));
        assert!(json.tools.iter().any(|t| t.name == "suggest_pc_build"));
    }

    #[tokio::test]
    async fn call_suggest_build() {
        let app = v1_router(test_state());
        let response = app
            .oneshot(call_request(serde_json::json!({
                "id": "call_7",
                "name": "suggest_pc_build",
                "arguments": {"budget": 60000}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: ToolResult = body_json(response).await;
        assert_eq!(result.call_id, "call_7");
        assert!(result.output.contains("Remaining budget"));
    }

    #[tokio::test]
    async fn call_unknown_tool_is_404() {
        let app = v1_router(test_state());
        let response = app
            .oneshot(call_request(serde_json::json!({"name": "overclock", "arguments": {}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_arguments_are_400() {
        let app = v1_router(test_state());
        let response = app
            .oneshot(call_request(serde_json::json!({
                "name": "find_parts_by_price_range",
                "arguments": {"min_price": 10, "max_price": 1}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse = body_json(response).await;
        assert!(err.error.contains("min_price"));
    }

    #[tokio::test]
    async fn read_freshness_resource() {
        let app = v1_router(test_state());
        let req = Request::builder()
            .uri("/resources/read?uri=file:///price/last_update")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let contents: ResourceContents = body_json(response).await;
        assert_eq!(contents.text, "Prices last updated: 2025-03-01");
        assert_eq!(contents.mime_type, "text/plain");
    }

    #[tokio::test]
    async fn unknown_resource_is_404() {
        let app = v1_router(test_state());
        let req = Request::builder()
            .uri("/resources/read?uri=file:///nothing")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_resources() {
        let app = v1_router(test_state());
        let req = Request::builder()
            .uri("/resources")
            .body(Body::empty())
            .unwrap();

        let json: ResourceListResponse = body_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(json.count, 1);
        assert_eq!(json.resources[0].uri, "file:///price/last_update");
    }

    #[test]
    fn catalog_errors_are_unprocessable() {
        let err = ToolError::Catalog(pcparts_core::error::CatalogError::CategoryMissing("psu".into()));
        assert_eq!(tool_error_status(&err), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

//! MCP host over stdio: newline-delimited JSON-RPC 2.0.
//!
//! One request per line on stdin, one response per line on stdout.
//! Logging goes to stderr so it never interleaves with protocol output.
//! Requests without an `id` are notifications and get no response.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use pcparts_core::error::ToolError;
use pcparts_core::tool::ToolCall;

use crate::{GatewayState, SharedState};

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Handle one line of input. Returns `None` for notifications.
pub async fn handle_message(state: &GatewayState, line: &str) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "Unparseable JSON-RPC message");
            return Some(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            ));
        }
    };

    let Some(id) = request.id else {
        debug!(method = %request.method, "Notification ignored");
        return None;
    };

    debug!(method = %request.method, "JSON-RPC request");
    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result()),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, tools_list(state)),
        "tools/call" => tools_call(state, id, request.params).await,
        "resources/list" => JsonRpcResponse::success(id, resources_list(state)),
        "resources/read" => resources_read(state, id, request.params).await,
        other => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
    };
    Some(response)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {}
        },
        "serverInfo": {
            "name": "pcparts",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn tools_list(state: &GatewayState) -> Value {
    let tools: Vec<Value> = state
        .tools
        .definitions()
        .into_iter()
        .map(|def| {
            json!({
                "name": def.name,
                "description": def.description,
                "inputSchema": def.parameters,
            })
        })
        .collect();
    json!({ "tools": tools })
}

async fn tools_call(state: &GatewayState, id: Value, params: Value) -> JsonRpcResponse {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name");
    };
    let call = ToolCall {
        id: call_id(&id),
        name: name.to_string(),
        arguments: params.get("arguments").cloned().unwrap_or_else(|| json!({})),
    };

    match state.tools.execute(&call).await {
        Ok(result) => JsonRpcResponse::success(
            id,
            json!({
                "content": [{"type": "text", "text": result.output}],
                "isError": false,
            }),
        ),
        Err(ToolError::Catalog(e)) => {
            warn!(tool = %name, error = %e, "Tool call failed");
            JsonRpcResponse::success(
                id,
                json!({
                    "content": [{"type": "text", "text": e.to_string()}],
                    "isError": true,
                }),
            )
        }
        Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
    }
}

/// Tool call id from a JSON-RPC id: strings verbatim, numbers as digits.
fn call_id(id: &Value) -> String {
    id.as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| id.to_string())
}

fn resources_list(state: &GatewayState) -> Value {
    let resources: Vec<Value> = state
        .resources
        .definitions()
        .into_iter()
        .map(|def| {
            json!({
                "uri": def.uri,
                "name": def.name,
                "description": def.description,
                "mimeType": def.mime_type,
            })
        })
        .collect();
    json!({ "resources": resources })
}

async fn resources_read(state: &GatewayState, id: Value, params: Value) -> JsonRpcResponse {
    let Some(uri) = params.get("uri").and_then(Value::as_str) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing resource uri");
    };
    let Some(resource) = state.resources.get(uri) else {
        return JsonRpcResponse::error(
            id,
            INVALID_PARAMS,
            ToolError::ResourceNotFound(uri.to_string()).to_string(),
        );
    };

    match resource.read().await {
        Ok(text) => JsonRpcResponse::success(
            id,
            json!({
                "contents": [{
                    "uri": uri,
                    "mimeType": resource.mime_type(),
                    "text": text,
                }]
            }),
        ),
        Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
    }
}

/// Serve JSON-RPC over stdin/stdout until stdin closes.
pub async fn serve_stdio(state: SharedState) -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    info!(
        tools = state.tools.len(),
        parts = state.catalog.len(),
        "stdio host ready"
    );

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(response) = handle_message(&state, line).await {
            let mut out = serde_json::to_string(&response).map_err(std::io::Error::other)?;
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, stdio host stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    async fn call(line: Value) -> JsonRpcResponse {
        let state = test_state();
        handle_message(&state, &line.to_string()).await.unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_protocol() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}})).await;
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "pcparts");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let state = test_state();
        let line = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        assert!(handle_message(&state, &line).await.is_none());
    }

    #[tokio::test]
    async fn parse_error() {
        let state = test_state();
        let resp = handle_message(&state, "{not json").await.unwrap();
        assert_eq!(resp.id, Value::Null);
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn unknown_method() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 2, "method": "prompts/list"})).await;
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn tools_list_uses_input_schema() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"})).await;
        let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 3);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn tools_call_returns_text_content() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": "a",
            "method": "tools/call",
            "params": {"name": "list_parts_by_category", "arguments": {"category": "GPU"}}
        }))
        .await;
        assert_eq!(resp.id, json!("a"));
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("[GPU PARTS]"));
    }

    #[test]
    fn call_id_keeps_string_ids_unquoted() {
        assert_eq!(call_id(&json!("a")), "a");
        assert_eq!(call_id(&json!(42)), "42");
    }

    #[tokio::test]
    async fn tools_call_unknown_tool_is_invalid_params() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "overclock"}
        }))
        .await;
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn low_budget_is_not_an_error() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "suggest_pc_build", "arguments": {"budget": 5000}}
        }))
        .await;
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], false);
        assert!(result["content"][0]["text"].as_str().unwrap().starts_with("Budget too low"));
    }

    #[tokio::test]
    async fn resources_read_freshness() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "resources/read",
            "params": {"uri": "file:///price/last_update"}
        }))
        .await;
        let result = resp.result.unwrap();
        assert_eq!(result["contents"][0]["text"], "Prices last updated: 2025-03-01");
        assert_eq!(result["contents"][0]["mimeType"], "text/plain");
    }

    #[tokio::test]
    async fn resources_read_unknown_uri() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "resources/read",
            "params": {"uri": "file:///nope"}
        }))
        .await;
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn resources_list() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list"})).await;
        let resources = resp.result.unwrap()["resources"].as_array().unwrap().clone();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0]["name"], "price_last_update");
    }
}

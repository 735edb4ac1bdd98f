//! JSON-RPC 2.0 wire types for the MCP stdio transport.
//!
//! Only the subset this server speaks: `initialize`, the
//! `notifications/initialized` acknowledgement, `ping`, `tools/list`, and
//! `tools/call`. Requests arrive one per line; responses leave one per line.

use crate::tools::core::ToolDef;
use serde::{Deserialize, Serialize};

/// JSON-RPC protocol marker. Always "2.0".
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server implements.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// ── Requests and responses ─────────────────────────────────────────

/// An incoming request or notification.
#[derive(Deserialize, Debug, Clone)]
pub struct Request {
    /// Protocol marker; rejected unless it is "2.0".
    #[serde(default)]
    pub jsonrpc: String,
    /// Request id. Notifications carry none and get no response.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// An outgoing response, success or error.
#[derive(Serialize, Debug)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    /// Success response carrying `result`.
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response with a standard code.
    pub fn error(id: serde_json::Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// JSON-RPC error object.
#[derive(Serialize, Debug)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

// ── MCP payloads ───────────────────────────────────────────────────

/// Result of the `initialize` handshake.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
    /// Usage guidance surfaced to the client's model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Advertised capabilities. This server only does tools.
#[derive(Serialize, Debug, Default)]
pub struct Capabilities {
    pub tools: ToolsCapability,
}

/// The `tools` capability object. Empty: list-changed notifications are not
/// emitted, the tool set is fixed at startup.
#[derive(Serialize, Debug, Default)]
pub struct ToolsCapability {}

/// Server identity reported during `initialize`.
#[derive(Serialize, Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Result of `tools/list`.
#[derive(Serialize, Debug)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDef>,
}

/// Parameters of `tools/call`.
#[derive(Deserialize, Debug)]
pub struct CallToolParams {
    pub name: String,
    /// Arguments object. Absent means the tool takes none.
    #[serde(default)]
    pub arguments: Option<serde_json::Value>,
}

/// Result of `tools/call`.
///
/// Tool-level failures are flagged with `is_error` inside a successful
/// response; JSON-RPC errors are reserved for protocol-level faults.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,
    pub is_error: bool,
}

impl CallToolResult {
    /// Successful call carrying one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Failed call; the message tells the caller how to correct it.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// A content block inside a tool result. Text is the only kind produced.
#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn responses_serialize_without_the_unused_half() {
        let ok = serde_json::to_value(Response::success(json!(1), json!({"x": 1}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {"x": 1}}));

        let err = serde_json::to_value(Response::error(json!(2), METHOD_NOT_FOUND, "nope"))
            .unwrap();
        assert_eq!(
            err,
            json!({"jsonrpc": "2.0", "id": 2, "error": {"code": -32601, "message": "nope"}})
        );
    }

    #[test]
    fn initialize_result_uses_wire_casing() {
        let result = serde_json::to_value(InitializeResult {
            protocol_version: PROTOCOL_VERSION,
            capabilities: Capabilities::default(),
            server_info: ServerInfo {
                name: "relay".into(),
                version: "0.0.0".into(),
            },
            instructions: None,
        })
        .unwrap();

        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "relay");
        assert_eq!(result["capabilities"]["tools"], json!({}));
        assert!(result.get("instructions").is_none());
    }

    #[test]
    fn tool_results_carry_text_content_blocks() {
        let ok = serde_json::to_value(CallToolResult::text("report")).unwrap();
        assert_eq!(
            ok,
            json!({"content": [{"type": "text", "text": "report"}], "isError": false})
        );

        let err = serde_json::to_value(CallToolResult::error("bad arguments")).unwrap();
        assert_eq!(err["isError"], true);
    }

    #[test]
    fn notifications_deserialize_without_an_id() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#)
                .unwrap();
        assert_eq!(req.method, "notifications/initialized");
        assert!(req.id.is_none());
        assert!(req.params.is_none());
    }
}

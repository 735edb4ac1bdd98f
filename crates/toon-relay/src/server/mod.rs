//! MCP server over stdio.
//!
//! Newline-delimited JSON-RPC: one request per line on stdin, one response
//! per line on stdout, flushed after every write. stdout belongs to the
//! transport, so all logging goes to stderr. Requests are handled one at a
//! time in arrival order; the loop ends when stdin reaches EOF.

pub mod protocol;

use crate::tools::core::ToolSet;
use protocol::{
    CallToolParams, CallToolResult, Capabilities, InitializeResult, Request, Response, ServerInfo,
    ToolsListResult,
};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Serves a [`ToolSet`] to an MCP client connected on stdio.
pub struct McpServer {
    tools: ToolSet,
    info: ServerInfo,
    instructions: Option<String>,
}

impl McpServer {
    /// Server identified by this crate's name and version.
    pub fn new(tools: ToolSet) -> Self {
        Self {
            tools,
            info: ServerInfo {
                name: crate::SERVER_NAME.to_string(),
                version: crate::SERVER_VERSION.to_string(),
            },
            instructions: None,
        }
    }

    /// Set the usage guidance sent to clients during `initialize`.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Handle one request. `None` means no response is owed (notification).
    pub async fn handle(&self, request: Request) -> Option<Response> {
        if request.jsonrpc != protocol::JSONRPC_VERSION {
            let id = request.id.unwrap_or(Value::Null);
            return Some(Response::error(
                id,
                protocol::INVALID_REQUEST,
                format!("unsupported jsonrpc version '{}'", request.jsonrpc),
            ));
        }

        // Notifications carry no id and get no response.
        let Some(id) = request.id else {
            debug!("[mcp] notification: {}", request.method);
            return None;
        };

        match request.method.as_str() {
            "initialize" => {
                info!("[mcp] initialize");
                let result = InitializeResult {
                    protocol_version: protocol::PROTOCOL_VERSION,
                    capabilities: Capabilities::default(),
                    server_info: self.info.clone(),
                    instructions: self.instructions.clone(),
                };
                Some(success(id, &result))
            }
            "ping" => Some(Response::success(id, Value::Object(Default::default()))),
            "tools/list" => {
                let result = ToolsListResult {
                    tools: self.tools.definitions(),
                };
                Some(success(id, &result))
            }
            "tools/call" => Some(self.call_tool(id, request.params).await),
            other => Some(Response::error(
                id,
                protocol::METHOD_NOT_FOUND,
                format!("unknown method '{other}'"),
            )),
        }
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> Response {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(p) => p,
                Err(e) => {
                    return Response::error(
                        id,
                        protocol::INVALID_PARAMS,
                        format!("invalid tools/call params: {e}"),
                    );
                }
            },
            None => {
                return Response::error(id, protocol::INVALID_PARAMS, "missing tools/call params");
            }
        };

        let arguments = params
            .arguments
            .map(|a| a.to_string())
            .unwrap_or_else(|| "{}".to_string());

        // Tool-level failures become results with isError set, not JSON-RPC
        // errors, so the calling model sees them and can correct itself.
        let result = match self.tools.execute(&params.name, &arguments).await {
            Ok(report) => CallToolResult::text(report),
            Err(message) => {
                warn!("[mcp] tool {} rejected the call: {message}", params.name);
                CallToolResult::error(message)
            }
        };
        success(id, &result)
    }

    /// Serve until stdin reaches EOF.
    pub async fn serve_stdio(&self) -> Result<(), String> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!(
            "[mcp] {} v{} serving {} tool(s) on stdio",
            self.info.name,
            self.info.version,
            self.tools.len()
        );

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("could not read stdin: {e}"))?
        {
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Request>(&line) {
                Ok(request) => self.handle(request).await,
                Err(e) => {
                    warn!("[mcp] unparseable request line: {e}");
                    Some(Response::error(
                        Value::Null,
                        protocol::PARSE_ERROR,
                        format!("could not parse request: {e}"),
                    ))
                }
            };

            if let Some(response) = response {
                let mut out = serde_json::to_string(&response)
                    .map_err(|e| format!("could not serialize response: {e}"))?;
                out.push('\n');
                stdout
                    .write_all(out.as_bytes())
                    .await
                    .map_err(|e| format!("could not write stdout: {e}"))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| format!("could not flush stdout: {e}"))?;
            }
        }

        info!("[mcp] stdin closed, shutting down");
        Ok(())
    }
}

/// Serialize an MCP payload into a success response.
fn success(id: Value, result: &impl serde::Serialize) -> Response {
    match serde_json::to_value(result) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(
            id,
            protocol::INTERNAL_ERROR,
            format!("could not serialize result: {e}"),
        ),
    }
}

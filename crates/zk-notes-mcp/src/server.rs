//! MCP Server implementation
//!
//! Newline-delimited JSON-RPC 2.0. Requests are answered strictly one after
//! another; the blocking notebook call runs off the async reader.

use super::handlers::ToolHandler;
use super::protocol::*;
use super::tools::all_tools;
use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use zk_notes_core::Handlers;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "zk-notes";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct McpServer {
    tool_handler: Arc<ToolHandler>,
    initialized: bool,
}

impl McpServer {
    pub fn new(handlers: Handlers) -> Self {
        Self {
            tool_handler: Arc::new(ToolHandler::new(handlers)),
            initialized: false,
        }
    }

    /// Run the server on stdin/stdout until stdin closes
    pub async fn run(&mut self) -> Result<()> {
        log::info!("MCP server starting on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        log::info!("MCP server shutting down");
        Ok(())
    }

    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            log::debug!("Received: {}", line);

            if let Some(response) = self.handle_message(line).await {
                let json = serde_json::to_string(&response)?;
                log::debug!("Sending: {}", json);
                writer.write_all(json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message
    async fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        // Notifications carry no id and get no response
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        Some(match self.handle_request(&request).await {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => log::info!("Client confirmed initialization"),
            "notifications/cancelled" => log::warn!("Request cancelled by client"),
            other => log::debug!("Unknown notification: {}", other),
        }
    }

    async fn handle_request(&mut self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        }
    }

    fn handle_initialize(&mut self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params: Option<InitializeParams> = params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

        if let Some(params) = &params {
            log::info!(
                "Initializing MCP server (client protocol: {})",
                params.protocol_version
            );
            if let Some(client) = &params.client_info {
                log::info!(
                    "Client: {} v{}",
                    client.name,
                    client.version.as_deref().unwrap_or("unknown")
                );
            }
        }

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        if !self.initialized {
            return Err(JsonRpcError::invalid_request("Server not initialized"));
        }

        let result = ToolsListResult { tools: all_tools() };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    async fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        if !self.initialized {
            return Err(JsonRpcError::invalid_request("Server not initialized"));
        }

        let params: ToolCallParams = params
            .clone()
            .ok_or_else(|| JsonRpcError::invalid_params("params required"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
            })?;

        log::info!("Tool call: {}", params.name);
        log::debug!("Arguments: {:?}", params.arguments);

        let handler = self.tool_handler.clone();
        let result = tokio::task::spawn_blocking(move || {
            handler.handle(&params.name, params.arguments)
        })
        .await
        .map_err(|e| JsonRpcError::internal_error(format!("Tool task failed: {}", e)))?;

        let tool_result = match result {
            Ok(value) => ToolCallResult::success(
                serde_json::to_string_pretty(&value)
                    .map_err(|e| JsonRpcError::internal_error(e.to_string()))?,
            ),
            Err(e) => {
                log::error!("Tool error: {}", e);
                ToolCallResult::error(e.to_string())
            }
        };

        serde_json::to_value(tool_result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

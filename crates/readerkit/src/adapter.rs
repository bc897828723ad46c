//! MCP request adapter
//!
//! Turns one inbound JSON-RPC request into one response. Transport
//! agnostic: the HTTP and stdio servers both call [`Adapter::dispatch`].
//!
//! Client-input problems and upstream failures are reported as
//! successful tool results carrying descriptive text. Only unknown
//! methods produce a JSON-RPC error object.

use crate::client::{ReaderClient, Upstream};
use crate::registry::{list_tools, response_kind_for};
use crate::rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::types::{CallToolResult, ToolContent};
use crate::{
    PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION, UPSTREAM_ERROR_PREFIX, URL_REQUIRED_MESSAGE,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Methods understood by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
}

impl Method {
    /// Parse a method name, `None` for anything unrecognized
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "initialize" => Some(Method::Initialize),
            "tools/list" => Some(Method::ToolsList),
            "tools/call" => Some(Method::ToolsCall),
            _ => None,
        }
    }
}

/// Outcome of a single tool call
///
/// All variants serialize to the same successful result shape; the tag
/// only records which path produced the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Upstream body, verbatim
    Ok(String),
    /// Missing URL or unknown tool name
    ClientInputError(String),
    /// Upstream fetch failed; text starts with `"Error fetching URL: "`
    UpstreamError(String),
}

impl ToolOutcome {
    /// Text carried by the outcome
    pub fn text(&self) -> &str {
        match self {
            ToolOutcome::Ok(text)
            | ToolOutcome::ClientInputError(text)
            | ToolOutcome::UpstreamError(text) => text,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ToolOutcome::Ok(_))
    }

    pub fn into_text(self) -> String {
        match self {
            ToolOutcome::Ok(text)
            | ToolOutcome::ClientInputError(text)
            | ToolOutcome::UpstreamError(text) => text,
        }
    }

    /// Wrap as a `tools/call` result payload
    pub fn into_result(self) -> CallToolResult {
        CallToolResult {
            content: vec![ToolContent::text(self.into_text())],
        }
    }
}

/// Dispatches MCP requests against an injected upstream
#[derive(Clone)]
pub struct Adapter {
    upstream: Arc<dyn Upstream>,
}

impl Adapter {
    /// Create an adapter over any upstream implementation
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    /// Create an adapter over a Reader engine client
    pub fn with_reader(client: ReaderClient) -> Self {
        Self::new(Arc::new(client))
    }

    /// Handle one request
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, id = ?request.id, "Dispatching request");

        match Method::parse(&request.method) {
            Some(Method::Initialize) => JsonRpcResponse::success(request.id, initialize_result()),
            Some(Method::ToolsList) => {
                JsonRpcResponse::success(request.id, json!({ "tools": list_tools() }))
            }
            Some(Method::ToolsCall) => {
                let params = request.params.unwrap_or(Value::Null);
                let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
                let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

                let outcome = self.call_tool(name, &arguments).await;
                let result = serde_json::to_value(outcome.into_result()).unwrap_or_default();
                JsonRpcResponse::success(request.id, result)
            }
            None => JsonRpcResponse::error(
                request.id,
                JsonRpcError::method_not_found(&request.method),
            ),
        }
    }

    /// Run one tool call
    ///
    /// The URL check precedes the name check, and neither failure
    /// contacts the upstream. A `url` that is not a non-empty string
    /// (number, bool, `""`) counts as missing.
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> ToolOutcome {
        let url = match arguments
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
        {
            Some(url) => url,
            None => return ToolOutcome::ClientInputError(URL_REQUIRED_MESSAGE.to_string()),
        };

        let Some(kind) = response_kind_for(name) else {
            return ToolOutcome::ClientInputError(format!("Unknown tool: {}", name));
        };

        debug!(tool = name, url, kind = %kind, "Calling tool");
        match self.upstream.fetch(url, kind).await {
            Ok(body) => ToolOutcome::Ok(body),
            Err(e) => ToolOutcome::UpstreamError(format!("{}{}", UPSTREAM_ERROR_PREFIX, e)),
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

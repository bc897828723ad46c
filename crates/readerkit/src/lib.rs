//! ReaderKit - MCP adapter for the Reader URL-to-content engine
//!
//! This crate exposes five tools (`get_markdown`, `get_html`, `get_text`,
//! `get_screenshot`, `get_pageshot`) to MCP clients. Each call is
//! forwarded to a Reader engine as `GET {base}/{url}` with an
//! `X-Respond-With` header naming the wanted representation, and the
//! response body is relayed back as tool text.
//!
//! ## Layers
//!
//! - [`registry`] - the static tool catalog and name-to-kind mapping
//! - [`ReaderClient`] - pooled HTTP client for the engine, behind the
//!   [`Upstream`] trait
//! - [`Adapter`] - JSON-RPC dispatch shared by every transport

pub mod adapter;
pub mod client;
mod error;
pub mod registry;
pub mod rpc;
mod types;

use std::time::Duration;

pub use adapter::{Adapter, Method, ToolOutcome};
pub use client::{ReaderClient, ReaderClientBuilder, Upstream};
pub use error::FetchError;
pub use registry::{list_tools, response_kind_for};
pub use rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use types::{
    CallToolResult, ResponseKind, ServerMetadata, ToolArguments, ToolContent, ToolDescriptor,
};

/// Server name announced to clients
pub const SERVER_NAME: &str = "reader-mcp";

/// Server version announced to clients
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server description returned by the metadata endpoint
pub const SERVER_DESCRIPTION: &str = "MCP server for Reader URL to LLM-friendly conversion";

/// MCP protocol revision implemented
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Default Reader engine address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default listen port for the HTTP transport
pub const DEFAULT_PORT: u16 = 8000;

/// Default total timeout for one upstream request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns ReaderKit/1.0";

/// Content-negotiation header understood by the Reader engine
pub const RESPOND_WITH_HEADER: &str = "X-Respond-With";

/// Tool text for a call without a usable `url` argument
pub const URL_REQUIRED_MESSAGE: &str = "Error: URL is required";

/// Prefix of tool text reporting an upstream failure
pub const UPSTREAM_ERROR_PREFIX: &str = "Error fetching URL: ";

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# Reader MCP Tools

Converts web pages into LLM-friendly representations through a Reader engine.

## Tools
- `get_markdown`: page content as markdown (bypasses readability processing)
- `get_html`: `documentElement.outerHTML`
- `get_text`: `document.body.innerText`
- `get_screenshot`: URL of a screen-size screenshot image
- `get_pageshot`: URL of a full-page screenshot image

## Input Parameters
- `url` (required): The page to convert, e.g. `https://example.com/page`

## Examples

### Fetch a page as markdown
```json
{"name": "get_markdown", "arguments": {"url": "https://example.com"}}
```

### Take a full-page screenshot
```json
{"name": "get_pageshot", "arguments": {"url": "https://example.com"}}
```

## Error Handling
- Missing `url` returns the text "Error: URL is required"
- Unknown tool names return "Unknown tool: <name>"
- Upstream failures return text starting with "Error fetching URL: "
"#;
